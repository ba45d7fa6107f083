use std::time::Duration;

use ais_api::restful::error_message;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::error::TransportError;
use crate::session::Session;

/// Capability the console needs from the backend. Paths are relative to
/// the configured base URL.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, TransportError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    async fn put(&self, path: &str, body: &Value) -> Result<Value, TransportError>;

    async fn delete(&self, path: &str) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://127.0.0.1:8000"),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    session: Session,
}

impl HttpClient {
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> Result<Url, TransportError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| TransportError::InvalidUrl(format!("{raw}: {e}")))
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, TransportError> {
        let mut request = self
            .http
            .request(method.clone(), self.url(path)?)
            .header(ACCEPT, "application/json");

        if let Some(credentials) = self.session.credentials().await {
            request = request.header(AUTHORIZATION, credentials.authorization());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "sending request");

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &bytes,
            );

            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!(path, "credentials rejected, ending session");
                self.session.teardown().await?;
                return Err(TransportError::AuthExpired { message });
            }

            tracing::debug!(%method, path, status = status.as_u16(), "request failed: {message}");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, TransportError> {
        self.send(Method::DELETE, path, None).await
    }
}
