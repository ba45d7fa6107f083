#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Non-2xx response; `message` follows the backend's `detail`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 401 response. The session has already been torn down.
    #[error("{message}")]
    AuthExpired { message: String },

    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request url: {0}")]
    InvalidUrl(String),

    #[error("Session store error: {0}")]
    Store(#[from] std::io::Error),
}

impl TransportError {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::AuthExpired { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, TransportError::AuthExpired { .. })
    }
}
