use ais_api::restful::COMPANIES;

use crate::client::ApiClient;
use crate::error::TransportError;
use crate::session::{Credentials, Session};

/// Starts a session and proves it against the backend with a cheap read.
/// Any failure leaves the session torn down.
pub async fn login<C: ApiClient + ?Sized>(
    client: &C,
    session: &Session,
    login: &str,
    password: &str,
) -> Result<(), TransportError> {
    session.begin(Credentials::encode(login, password)).await?;

    match client.get(COMPANIES).await {
        Ok(_) => {
            tracing::info!(login, "logged in");
            Ok(())
        }
        Err(e @ (TransportError::Status { .. } | TransportError::AuthExpired { .. })) => {
            tracing::warn!(login, "login rejected: {e}");
            session.teardown().await?;
            Err(TransportError::InvalidCredentials)
        }
        Err(e) => {
            session.teardown().await?;
            Err(e)
        }
    }
}

pub async fn logout(session: &Session) -> Result<(), TransportError> {
    session.teardown().await?;
    tracing::info!("logged out");
    Ok(())
}
