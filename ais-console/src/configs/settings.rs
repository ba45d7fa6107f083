use std::env;
use std::time::Duration;

use ais_client::ClientConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::configs::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Api {
    pub base_url: String,
    /// Seconds
    pub timeout: u64,
    /// Seconds
    pub connect_timeout: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFile {
    /// Where the credential blob survives restarts. Memory only when unset.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub api: Api,
    #[serde(default)]
    pub session: SessionFile,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let mut settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::with_prefix("AIS").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(path) = &settings.session.path {
            let path = normalize_path(path)
                .map_err(|e| ConfigError::Message(e.to_string()))?
                .to_string_lossy()
                .to_string();

            settings.session.path = Some(path);
        }

        Ok(settings)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout),
            connect_timeout: Duration::from_secs(self.api.connect_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(include_str!("../../configs/default.toml"), FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.session.path.as_deref(), Some("~/.session"));

        let client = settings.client_config();
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_session_section_is_optional() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                "[logger]\nlevel = \"debug\"\n[api]\nbase_url = \"http://backend\"\ntimeout = 5\nconnect_timeout = 2\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(settings.session.path.is_none());
    }
}
