use std::sync::Mutex;

use ais_api::{FieldValue, Record};
use ais_client::TransportError;
use ais_console::entity::descriptor::{Descriptor, EntityKind, IdentityKey};
use ais_console::entity::filter::Scope;
use ais_console::errors::ConsoleError;
use ais_console::services::{EntityGateway, Refresh};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(EntityKind, Record),
    Update(EntityKind, Vec<FieldValue>, Record),
    Delete(EntityKind, Vec<FieldValue>),
}

/// Records every mutation and optionally rejects them with a backend
/// message.
#[derive(Default)]
pub struct MockGateway {
    pub calls: Mutex<Vec<Call>>,
    pub reject: Mutex<Option<(u16, String)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject: Mutex::new(Some((status, message.to_string()))),
        }
    }

    pub fn accept(&self) {
        self.reject.lock().unwrap().take();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ConsoleError> {
        self.calls.lock().unwrap().push(call);
        match self.reject.lock().unwrap().clone() {
            Some((401, message)) => Err(TransportError::AuthExpired { message }.into()),
            Some((status, message)) => Err(TransportError::Status { status, message }.into()),
            None => Ok(()),
        }
    }
}

fn values(key: &IdentityKey) -> Vec<FieldValue> {
    key.values().into_iter().cloned().collect()
}

#[async_trait]
impl EntityGateway for MockGateway {
    async fn create(&self, descriptor: &Descriptor, payload: &Record) -> Result<(), ConsoleError> {
        self.record(Call::Create(descriptor.kind, payload.clone()))
    }

    async fn update(
        &self,
        descriptor: &Descriptor,
        key: &IdentityKey,
        payload: &Record,
    ) -> Result<(), ConsoleError> {
        self.record(Call::Update(descriptor.kind, values(key), payload.clone()))
    }

    async fn delete(&self, descriptor: &Descriptor, key: &IdentityKey) -> Result<(), ConsoleError> {
        self.record(Call::Delete(descriptor.kind, values(key)))
    }
}

/// Remembers which refreshes were requested.
#[derive(Default)]
pub struct MockRefresh {
    pub requests: Mutex<Vec<(EntityKind, Scope)>>,
}

impl MockRefresh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<(EntityKind, Scope)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Refresh for MockRefresh {
    async fn refresh(&self, kind: EntityKind, scope: &Scope) -> Result<(), ConsoleError> {
        self.requests.lock().unwrap().push((kind, scope.clone()));
        Ok(())
    }
}
