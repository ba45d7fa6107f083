use std::sync::Arc;

use ais_client::{FileStore, HttpClient, MemoryStore, Session, SessionStore};
use tokio::io::BufReader;

use crate::configs::Settings;
use crate::shell::Console;

pub mod configs;
pub mod entity;
pub mod errors;
pub mod services;
pub mod shell;

pub async fn run(settings: &Settings) -> anyhow::Result<()> {
    let store: Arc<dyn SessionStore> = match &settings.session.path {
        Some(path) => Arc::new(FileStore::new(path)),
        None => Arc::new(MemoryStore::new()),
    };
    let session = Session::init(store).await?;
    let client = Arc::new(HttpClient::new(settings.client_config(), session.clone())?);

    tracing::info!("backend at {}", settings.api.base_url);

    let mut console = Console::new(client, session.clone());
    if session.is_authenticated().await {
        if let Some(reply) = console.handle_line("refresh companies").await {
            tracing::debug!("restored session: {reply:?}");
        }
    }

    shell::repl(&mut console, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    Ok(())
}
