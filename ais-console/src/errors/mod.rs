pub mod validation;

pub use validation::ValidationError;

use ais_client::TransportError;

use crate::shell::command::ParseError;

/// Anything an operator action can fail with. `Display` is the message
/// shown to the operator.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Command(#[from] ParseError),
}

impl ConsoleError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ConsoleError::Transport(e) if e.is_auth_expired())
    }
}
