use std::sync::Arc;

use ais_api::Record;
use ais_api::restful::expand;
use ais_client::{ApiClient, TransportError};
use async_trait::async_trait;
use serde_json::Value;

use crate::entity::descriptor::{Descriptor, IdentityKey, ItemRoute};
use crate::entity::filter::Scope;
use crate::errors::{ConsoleError, ValidationError};

/// Mutations an entity section can submit. Update and delete address the
/// record by its identity values in declared order.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    async fn create(&self, descriptor: &Descriptor, payload: &Record) -> Result<(), ConsoleError>;

    async fn update(
        &self,
        descriptor: &Descriptor,
        key: &IdentityKey,
        payload: &Record,
    ) -> Result<(), ConsoleError>;

    async fn delete(&self, descriptor: &Descriptor, key: &IdentityKey) -> Result<(), ConsoleError>;
}

/// Maps descriptor routes onto the REST backend.
#[derive(Clone)]
pub struct RestGateway {
    client: Arc<dyn ApiClient>,
}

impl RestGateway {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, descriptor: &Descriptor, scope: &Scope) -> Result<Vec<Record>, ConsoleError> {
        let path = list_path(descriptor, scope)?;
        let body = self.client.get(&path).await?;
        Ok(records(body)?)
    }
}

/// List route for `scope`. Scoped entities refuse to list without a parent.
pub fn list_path(descriptor: &Descriptor, scope: &Scope) -> Result<String, ValidationError> {
    match (descriptor.filter.parent_field(), scope) {
        (None, _) => Ok(descriptor.routes.list.to_string()),
        (Some(field), Scope::Parent(id)) => Ok(expand(descriptor.routes.list, [(field, id.to_string())])),
        (Some(_), Scope::All) => Err(ValidationError::MissingFilter {
            parent: descriptor.filter.label().unwrap_or_default(),
            entity: descriptor.kind.key(),
        }),
    }
}

fn item_path(route: &ItemRoute, key: &IdentityKey) -> String {
    expand(
        route.template,
        key.parts().map(|(field, value)| (field, value.to_string())),
    )
}

/// List endpoints answer with an array; a lone object or an empty body is
/// tolerated.
fn records(body: Value) -> Result<Vec<Record>, TransportError> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => Ok(serde_json::from_value(body)?),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

fn unsupported(descriptor: &Descriptor, action: &'static str) -> ConsoleError {
    ValidationError::Unsupported {
        entity: descriptor.title,
        action,
    }
    .into()
}

#[async_trait]
impl EntityGateway for RestGateway {
    async fn create(&self, descriptor: &Descriptor, payload: &Record) -> Result<(), ConsoleError> {
        let route = descriptor
            .routes
            .create
            .ok_or_else(|| unsupported(descriptor, "created"))?;

        tracing::debug!(entity = %descriptor.kind, "create");
        self.client.post(route, &payload.to_value()).await?;
        Ok(())
    }

    async fn update(
        &self,
        descriptor: &Descriptor,
        key: &IdentityKey,
        payload: &Record,
    ) -> Result<(), ConsoleError> {
        let route = descriptor
            .routes
            .update
            .as_ref()
            .ok_or_else(|| unsupported(descriptor, "edited"))?;

        let mut body = payload.clone();
        for &field in &route.body_keys {
            if let Some(value) = key.get(field) {
                body.insert(field, value.clone());
            }
        }

        let path = item_path(route, key);
        tracing::debug!(entity = %descriptor.kind, path = %path, "update");
        self.client.put(&path, &body.to_value()).await?;
        Ok(())
    }

    async fn delete(&self, descriptor: &Descriptor, key: &IdentityKey) -> Result<(), ConsoleError> {
        let route = descriptor
            .routes
            .delete
            .as_ref()
            .ok_or_else(|| unsupported(descriptor, "deleted"))?;

        let path = item_path(route, key);
        tracing::debug!(entity = %descriptor.kind, path = %path, "delete");
        self.client.delete(&path).await?;
        Ok(())
    }
}
