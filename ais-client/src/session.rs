use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::{Mutex, RwLock};

use crate::error::TransportError;

/// Opaque Basic-auth blob, `base64("login:password")`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn encode(login: &str, password: &str) -> Self {
        Self(STANDARD.encode(format!("{login}:{password}")))
    }

    /// Wraps a blob restored from a store without re-encoding it.
    pub fn from_blob<S: Into<String>>(blob: S) -> Self {
        Self(blob.into())
    }

    pub fn blob(&self) -> &str {
        &self.0
    }

    pub fn authorization(&self) -> String {
        format!("Basic {}", self.0)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(***)")
    }
}

/// Where the credential blob lives between runs.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> io::Result<Option<Credentials>>;

    async fn save(&self, credentials: &Credentials) -> io::Result<()>;

    async fn clear(&self) -> io::Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<Credentials>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> io::Result<Option<Credentials>> {
        Ok(self.blob.lock().await.clone())
    }

    async fn save(&self, credentials: &Credentials) -> io::Result<()> {
        *self.blob.lock().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> io::Result<()> {
        *self.blob.lock().await = None;
        Ok(())
    }
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> io::Result<Option<Credentials>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(blob) if !blob.trim().is_empty() => Ok(Some(Credentials::from_blob(blob.trim()))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn save(&self, credentials: &Credentials) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, credentials.blob()).await
    }

    async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Process-wide authentication context shared by the transport and the
/// console. Cloning shares the same state.
#[derive(Clone)]
pub struct Session {
    credentials: Arc<RwLock<Option<Credentials>>>,
    store: Arc<dyn SessionStore>,
}

impl Session {
    /// Restores whatever the store holds from a previous run.
    pub async fn init(store: Arc<dyn SessionStore>) -> Result<Self, TransportError> {
        let restored = store.load().await?;
        if restored.is_some() {
            tracing::debug!("restored persisted session");
        }

        Ok(Self {
            credentials: Arc::new(RwLock::new(restored)),
            store,
        })
    }

    pub fn in_memory() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(None)),
            store: Arc::new(MemoryStore::new()),
        }
    }

    pub async fn begin(&self, credentials: Credentials) -> Result<(), TransportError> {
        self.store.save(&credentials).await?;
        *self.credentials.write().await = Some(credentials);
        Ok(())
    }

    /// Forgets the credentials in memory and in the store.
    pub async fn teardown(&self) -> Result<(), TransportError> {
        self.credentials.write().await.take();
        self.store.clear().await?;
        tracing::debug!("session torn down");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.credentials.read().await.is_some()
    }

    pub async fn credentials(&self) -> Option<Credentials> {
        self.credentials.read().await.clone()
    }
}
