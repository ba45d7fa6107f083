use std::collections::BTreeMap;
use std::sync::Arc;

use ais_api::Record;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entity::catalog::Catalog;
use crate::entity::descriptor::EntityKind;
use crate::entity::filter::Scope;
use crate::errors::ConsoleError;

use super::gateway::{RestGateway, list_path};

/// Reloads one entity's dataset for a scope.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh(&self, kind: EntityKind, scope: &Scope) -> Result<(), ConsoleError>;
}

/// Records of one entity kind as last loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub loading: bool,
    /// Scope of the records currently held.
    pub scope: Option<Scope>,
}

/// Owns every dataset. Entity managers never touch these directly; they ask
/// for a refresh and the dashboard loads.
pub struct Dashboard {
    catalog: Catalog,
    gateway: RestGateway,
    datasets: Arc<RwLock<BTreeMap<EntityKind, Dataset>>>,
}

impl Dashboard {
    pub fn new(catalog: Catalog, gateway: RestGateway) -> Self {
        Self {
            catalog,
            gateway,
            datasets: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn gateway(&self) -> &RestGateway {
        &self.gateway
    }

    /// Loads `kind` for `scope`, returning how many records arrived.
    ///
    /// Overlapping loads are not serialised: whichever finishes last owns the
    /// dataset, and any completion clears the loading flag. A failed load
    /// keeps the records already shown.
    pub async fn load(&self, kind: EntityKind, scope: &Scope) -> Result<usize, ConsoleError> {
        let descriptor = self.catalog.get(kind);
        list_path(&descriptor, scope)?;

        self.datasets.write().await.entry(kind).or_default().loading = true;
        tracing::debug!(entity = %kind, %scope, "loading");

        let result = self.gateway.list(&descriptor, scope).await;

        let mut datasets = self.datasets.write().await;
        let dataset = datasets.entry(kind).or_default();
        dataset.loading = false;

        match result {
            Ok(records) => {
                let count = records.len();
                dataset.records = records;
                dataset.scope = Some(scope.clone());
                tracing::debug!(entity = %kind, count, "loaded");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(entity = %kind, "load failed: {e}");
                Err(e)
            }
        }
    }

    pub async fn dataset(&self, kind: EntityKind) -> Dataset {
        self.datasets.read().await.get(&kind).cloned().unwrap_or_default()
    }

    /// Drops every dataset, as on logout.
    pub async fn clear(&self) {
        self.datasets.write().await.clear();
    }
}

#[async_trait]
impl Refresh for Dashboard {
    async fn refresh(&self, kind: EntityKind, scope: &Scope) -> Result<(), ConsoleError> {
        self.load(kind, scope).await.map(|_| ())
    }
}
