mod settings;

use std::env;
use std::io;
use std::path::PathBuf;

pub use settings::{Api, Logger, SessionFile, Settings};

fn project_root() -> io::Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // development and testing environments
        return Ok(PathBuf::from(manifest_dir));
    }

    // runtime root relative path `folder/executable` -> `folder/`
    let exe = env::current_exe()?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))
}

/// Resolves a leading `~/` against the project root.
pub fn normalize_path(path: &str) -> io::Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => Ok(project_root()?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_plain_paths() {
        assert_eq!(normalize_path("/tmp/session").unwrap(), PathBuf::from("/tmp/session"));
        assert_eq!(normalize_path("data/session").unwrap(), PathBuf::from("data/session"));
    }

    #[test]
    fn test_normalize_expands_project_root() {
        let path = normalize_path("~/.session").unwrap();
        assert!(path.ends_with(".session"));
        assert!(path.is_absolute());
    }
}
