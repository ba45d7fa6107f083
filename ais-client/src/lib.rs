pub mod auth;
pub mod client;
pub mod error;
pub mod session;

pub use client::{ApiClient, ClientConfig, HttpClient};
pub use error::TransportError;
pub use session::{Credentials, FileStore, MemoryStore, Session, SessionStore};
