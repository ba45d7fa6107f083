use std::sync::Arc;

use ais_api::{FieldValue, Id, Record};

use crate::errors::{ConsoleError, ValidationError};
use crate::services::dashboard::Refresh;
use crate::services::gateway::EntityGateway;

use super::coercion::{check_required, coerce, parse_integer};
use super::descriptor::{Descriptor, EntityKind, FormMode};
use super::filter::{Filter, Scope};
use super::modal::{Modal, Phase};
use super::view::{FormView, ListView};

enum Mutation {
    Create(Record),
    Update(Record),
    Delete,
}

/// Drives one entity section: its filter, its single modal and the
/// mutations submitted through it. Datasets belong to the caller and are
/// only ever changed by asking the caller to refresh.
#[derive(Debug, Clone)]
pub struct EntityManager {
    descriptor: Arc<Descriptor>,
    filter: Filter,
    modal: Modal,
}

impl EntityManager {
    pub fn new(descriptor: Arc<Descriptor>) -> Self {
        Self {
            filter: Filter::new(descriptor.filter, descriptor.kind.key()),
            modal: Modal::Closed,
            descriptor,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn enter_filter(&mut self, value: impl Into<String>) {
        self.filter.enter(value);
    }

    /// Asks the caller to reload with the pending filter. An empty filter on
    /// a scoped entity fails before the caller is involved.
    pub async fn refresh<R>(&mut self, refresh: &R) -> Result<Scope, ConsoleError>
    where
        R: Refresh + ?Sized,
    {
        let scope = self.filter.apply()?;
        refresh.refresh(self.kind(), &scope).await?;
        Ok(scope)
    }

    pub fn open_create(&mut self) -> Result<(), ValidationError> {
        if !self.descriptor.can_create() {
            return Err(self.unsupported("created"));
        }
        self.modal.open(Modal::create())
    }

    pub fn open_edit(&mut self, record: &Record) -> Result<(), ValidationError> {
        if !self.descriptor.can_update() {
            return Err(self.unsupported("edited"));
        }
        self.descriptor.identity.key_of(record)?;
        self.modal.open(Modal::edit(record.clone()))
    }

    pub fn open_delete(&mut self, record: &Record) -> Result<(), ValidationError> {
        if !self.descriptor.can_delete() {
            return Err(self.unsupported("deleted"));
        }
        self.descriptor.identity.key_of(record)?;
        self.modal.open(Modal::delete(record.clone()))
    }

    /// Writes one draft value of the open create or edit form.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), ValidationError> {
        let mode = self.modal.form_mode().ok_or(ValidationError::NoModal)?;
        if self.modal.phase() != Some(Phase::Open) {
            return Err(ValidationError::Submitting);
        }

        let spec = self
            .descriptor
            .fields(mode)
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))?;

        if mode == FormMode::Edit && spec.disabled_on_edit {
            return Err(ValidationError::FieldLocked(spec.name));
        }
        if !spec.accepts(value) {
            return Err(ValidationError::InvalidOption {
                field: spec.name,
                value: value.to_string(),
            });
        }

        let field = spec.name;
        if let Some(draft) = self.modal.draft_mut() {
            draft.set(field, value);
        }
        Ok(())
    }

    /// Cancels whatever form is open. The draft is discarded.
    pub fn close(&mut self) {
        self.modal.close();
    }

    pub fn form(&self) -> Option<FormView> {
        FormView::build(&self.descriptor, &self.modal)
    }

    pub fn render(&self, records: &[Record], loading: bool) -> ListView {
        ListView::build(&self.descriptor, &self.filter, records, loading)
    }

    /// Submits the open form.
    ///
    /// A rejected mutation leaves the form open with its draft intact. An
    /// accepted one closes the form and asks the caller to refresh; a failed
    /// refresh is returned even though the mutation went through.
    pub async fn submit<G, R>(&mut self, gateway: &G, refresh: &R) -> Result<(), ConsoleError>
    where
        G: EntityGateway + ?Sized,
        R: Refresh + ?Sized,
    {
        let kind = self.kind();
        let (mutation, parent) = self.prepare()?;
        let key = match self.modal.record() {
            Some(record) => Some(self.descriptor.identity.key_of(record)?),
            None => None,
        };
        self.modal.begin_submit()?;

        let result = match (&mutation, &key) {
            (Mutation::Create(payload), _) => gateway.create(&self.descriptor, payload).await,
            (Mutation::Update(payload), Some(key)) => gateway.update(&self.descriptor, key, payload).await,
            (Mutation::Delete, Some(key)) => gateway.delete(&self.descriptor, key).await,
            (_, None) => Err(ValidationError::NoModal.into()),
        };

        if let Err(e) = result {
            tracing::error!(entity = %kind, "submit failed: {e}");
            self.modal.fail()?;
            return Err(e);
        }

        tracing::info!(entity = %kind, "{} saved", self.descriptor.noun);
        self.modal.close();

        if self.filter.input().is_empty() {
            if let Some(parent) = parent {
                self.filter.enter(parent.to_string());
            }
        }

        match self.filter.apply() {
            Ok(scope) => refresh.refresh(kind, &scope).await,
            Err(e) => {
                tracing::warn!(entity = %kind, "no scope to refresh with: {e}");
                Ok(())
            }
        }
    }

    /// Validates and coerces the open form, and finds the parent identifier
    /// a follow-up refresh may fall back on.
    fn prepare(&self) -> Result<(Mutation, Option<Id>), ValidationError> {
        let mutation = match &self.modal {
            Modal::Closed => return Err(ValidationError::NoModal),
            Modal::Create { draft, .. } => {
                let fields = self.descriptor.fields(FormMode::Create);
                check_required(fields, draft)?;
                Mutation::Create(coerce(fields, draft, FormMode::Create))
            }
            Modal::Edit { draft, .. } => {
                let fields = self.descriptor.fields(FormMode::Edit);
                check_required(fields, draft)?;
                Mutation::Update(coerce(fields, draft, FormMode::Edit))
            }
            Modal::Delete { .. } => Mutation::Delete,
        };

        Ok((mutation, self.parent()))
    }

    /// Parent identifier of the open form's record. A create form only
    /// offers one when the typed value parses, so a `0` sent in place of
    /// bad input never becomes the filter.
    fn parent(&self) -> Option<Id> {
        let field = self.descriptor.filter.parent_field()?;
        let id = match &self.modal {
            Modal::Create { draft, .. } => draft.get(field).and_then(parse_integer),
            Modal::Edit { record, .. } | Modal::Delete { record, .. } => {
                record.get(field).and_then(FieldValue::as_i64)
            }
            Modal::Closed => None,
        }?;
        Id::try_from(id).ok()
    }

    fn unsupported(&self, action: &'static str) -> ValidationError {
        ValidationError::Unsupported {
            entity: self.descriptor.title,
            action,
        }
    }
}
