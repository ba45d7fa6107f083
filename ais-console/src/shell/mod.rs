pub mod command;
pub mod render;

use std::collections::BTreeMap;
use std::sync::Arc;

use ais_client::auth::{login, logout};
use ais_client::{ApiClient, Session};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::entity::catalog::Catalog;
use crate::entity::descriptor::EntityKind;
use crate::entity::filter::Scope;
use crate::entity::manager::EntityManager;
use crate::errors::{ConsoleError, ValidationError};
use crate::services::dashboard::Dashboard;
use crate::services::gateway::RestGateway;
use crate::services::overview::sensor_overview;

pub use command::{Command, HELP, ParseError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

/// Operator front end: one entity manager per section over a shared
/// dashboard. At most one form is open across all sections.
pub struct Console {
    client: Arc<dyn ApiClient>,
    session: Session,
    dashboard: Dashboard,
    managers: BTreeMap<EntityKind, EntityManager>,
    active: Option<EntityKind>,
}

impl Console {
    pub fn new(client: Arc<dyn ApiClient>, session: Session) -> Self {
        let catalog = Catalog::standard();
        let managers = catalog
            .iter()
            .map(|descriptor| (descriptor.kind, EntityManager::new(descriptor.clone())))
            .collect();

        Self {
            dashboard: Dashboard::new(catalog, RestGateway::new(client.clone())),
            client,
            session,
            managers,
            active: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn manager(&self, kind: EntityKind) -> Option<&EntityManager> {
        self.managers.get(&kind)
    }

    /// Parses and runs one input line. Failures come back as text; only
    /// `quit` ends the loop.
    pub async fn handle_line(&mut self, line: &str) -> Option<Reply> {
        if line.trim().is_empty() {
            return None;
        }

        let result = match line.parse::<Command>() {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e.into()),
        };

        Some(match result {
            Ok(reply) => reply,
            Err(e) if e.is_auth_expired() => {
                tracing::warn!("session expired: {e}");
                self.reset().await;
                Reply::Text(format!("Error: {e}\nSession ended. Please log in again."))
            }
            Err(e) => {
                tracing::error!("{e}");
                Reply::Text(format!("Error: {e}"))
            }
        })
    }

    pub async fn execute(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        if !command.is_public() && !self.session.is_authenticated().await {
            return Ok("Not logged in. Use `login <login> <password>`.".into());
        }

        match command {
            Command::Login { login: user, password } => {
                login(self.client.as_ref(), &self.session, &user, &password).await?;
                let count = self.dashboard.load(EntityKind::Companies, &Scope::All).await?;
                Ok(format!("Logged in as {user}. {count} companies loaded.").into())
            }
            Command::Logout => {
                logout(&self.session).await?;
                self.reset().await;
                Ok("Logged out.".into())
            }
            Command::Entities => {
                let lines: Vec<_> = self
                    .dashboard
                    .catalog()
                    .iter()
                    .map(|d| match d.filter.label() {
                        Some(parent) => format!("{:<12} {} (by {parent})", d.kind.key(), d.title),
                        None => format!("{:<12} {}", d.kind.key(), d.title),
                    })
                    .collect();
                Ok(lines.join("\n").into())
            }
            Command::Show(kind) => self.show(kind).await,
            Command::Filter(kind, value) => {
                let manager = section(&mut self.managers, self.dashboard.catalog(), kind);
                manager.enter_filter(value);
                let descriptor = manager.descriptor();
                Ok(format!(
                    "{} {} set to {:?}. Use `refresh {kind}` to load.",
                    descriptor.title,
                    descriptor.filter.label().unwrap_or("filter"),
                    manager.filter().input(),
                )
                .into())
            }
            Command::Refresh(kind) => {
                section(&mut self.managers, self.dashboard.catalog(), kind)
                    .refresh(&self.dashboard)
                    .await?;
                self.show(kind).await
            }
            Command::Create(kind) => {
                self.ensure_no_form()?;
                section(&mut self.managers, self.dashboard.catalog(), kind).open_create()?;
                self.active = Some(kind);
                self.form()
            }
            Command::Edit(kind, row) => {
                self.ensure_no_form()?;
                let record = self.record_at(kind, row).await?;
                section(&mut self.managers, self.dashboard.catalog(), kind).open_edit(&record)?;
                self.active = Some(kind);
                self.form()
            }
            Command::Delete(kind, row) => {
                self.ensure_no_form()?;
                let record = self.record_at(kind, row).await?;
                section(&mut self.managers, self.dashboard.catalog(), kind).open_delete(&record)?;
                self.active = Some(kind);
                self.form()
            }
            Command::Set { field, value } => {
                let kind = self.active.ok_or(ValidationError::NoModal)?;
                section(&mut self.managers, self.dashboard.catalog(), kind).set_field(&field, &value)?;
                Ok(format!("{field} = {value:?}").into())
            }
            Command::Form => self.form(),
            Command::Submit => {
                let kind = self.active.ok_or(ValidationError::NoModal)?;
                let manager = section(&mut self.managers, self.dashboard.catalog(), kind);
                let result = manager.submit(self.dashboard.gateway(), &self.dashboard).await;
                if !manager.modal().is_open() {
                    self.active = None;
                }
                result?;
                self.show(kind).await
            }
            Command::Cancel => {
                let kind = self.active.take().ok_or(ValidationError::NoModal)?;
                section(&mut self.managers, self.dashboard.catalog(), kind).close();
                Ok("Form closed.".into())
            }
            Command::Overview(sensor_id) => {
                let overview = sensor_overview(self.client.as_ref(), sensor_id).await?;
                Ok(overview.to_string().into())
            }
            Command::Help => Ok(HELP.into()),
            Command::Quit => Ok(Reply::Quit),
        }
    }

    async fn show(&self, kind: EntityKind) -> Result<Reply, ConsoleError> {
        let dataset = self.dashboard.dataset(kind).await;
        let descriptor = self.dashboard.catalog().get(kind);
        let view = match self.managers.get(&kind) {
            Some(manager) => manager.render(&dataset.records, dataset.loading),
            None => EntityManager::new(descriptor).render(&dataset.records, dataset.loading),
        };
        Ok(view.to_string().into())
    }

    fn form(&self) -> Result<Reply, ConsoleError> {
        let kind = self.active.ok_or(ValidationError::NoModal)?;
        let form = self
            .managers
            .get(&kind)
            .and_then(EntityManager::form)
            .ok_or(ValidationError::NoModal)?;
        Ok(form.to_string().into())
    }

    fn ensure_no_form(&self) -> Result<(), ValidationError> {
        match self.active {
            Some(_) => Err(ValidationError::ModalOpen),
            None => Ok(()),
        }
    }

    async fn record_at(&self, kind: EntityKind, row: usize) -> Result<ais_api::Record, ValidationError> {
        self.dashboard
            .dataset(kind)
            .await
            .records
            .get(row.saturating_sub(1))
            .cloned()
            .ok_or(ValidationError::UnknownRow(row))
    }

    /// Back to the unauthenticated state: forms closed, data dropped.
    async fn reset(&mut self) {
        for manager in self.managers.values_mut() {
            manager.close();
        }
        self.active = None;
        self.dashboard.clear().await;
    }
}

fn section<'a>(
    managers: &'a mut BTreeMap<EntityKind, EntityManager>,
    catalog: &Catalog,
    kind: EntityKind,
) -> &'a mut EntityManager {
    managers
        .entry(kind)
        .or_insert_with(|| EntityManager::new(catalog.get(kind)))
}

/// Reads commands line by line until `quit` or end of input.
pub async fn repl<R, W>(console: &mut Console, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(b"Type `help` for commands.\n> ").await?;
    output.flush().await?;

    while let Some(line) = lines.next_line().await? {
        match console.handle_line(&line).await {
            Some(Reply::Quit) => break,
            Some(Reply::Text(text)) => {
                output.write_all(text.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            None => {}
        }
        output.write_all(b"> ").await?;
        output.flush().await?;
    }

    Ok(())
}
