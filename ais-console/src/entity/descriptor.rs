use std::fmt;
use std::str::FromStr;

use ais_api::{FieldValue, Record};

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Companies,
    Rooms,
    Users,
    Sensors,
    Limitations,
    Events,
    Indications,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Companies,
        EntityKind::Rooms,
        EntityKind::Users,
        EntityKind::Sensors,
        EntityKind::Limitations,
        EntityKind::Events,
        EntityKind::Indications,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::Companies => "companies",
            EntityKind::Rooms => "rooms",
            EntityKind::Users => "users",
            EntityKind::Sensors => "sensors",
            EntityKind::Limitations => "limitations",
            EntityKind::Events => "events",
            EntityKind::Indications => "indications",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Which parent identifier narrows the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    None,
    CompanyId,
    RoomId,
    SensorId,
}

impl FilterKind {
    /// Record field holding the parent identifier, also the list route's
    /// placeholder.
    pub fn parent_field(&self) -> Option<&'static str> {
        match self {
            FilterKind::None => None,
            FilterKind::CompanyId => Some("company_id"),
            FilterKind::RoomId => Some("room_id"),
            FilterKind::SensorId => Some("sensor_id"),
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            FilterKind::None => None,
            FilterKind::CompanyId => Some("company ID"),
            FilterKind::RoomId => Some("room ID"),
            FilterKind::SensorId => Some("sensor ID"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Password,
    Select,
}

/// How a draft string becomes a payload value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Raw,
    Integer,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    pub fn plain(value: &'static str) -> Self {
        Self { value, label: value }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub coercion: Coercion,
    pub required: bool,
    /// Shown but immutable once the record exists.
    pub disabled_on_edit: bool,
    pub options: Vec<SelectOption>,
}

impl FieldSpec {
    fn simple(name: &'static str, label: &'static str, input: InputKind, coercion: Coercion) -> Self {
        Self {
            name,
            label,
            input,
            coercion,
            required: false,
            disabled_on_edit: false,
            options: Vec::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::simple(name, label, InputKind::Text, Coercion::Raw)
    }

    /// Numeric input sent as an integer.
    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::simple(name, label, InputKind::Number, Coercion::Integer)
    }

    pub fn password(name: &'static str, label: &'static str) -> Self {
        Self::simple(name, label, InputKind::Password, Coercion::Raw)
    }

    pub fn select<I>(name: &'static str, label: &'static str, options: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        Self {
            options: options.into_iter().map(SelectOption::plain).collect(),
            ..Self::simple(name, label, InputKind::Select, Coercion::Raw)
        }
    }

    /// Two-valued selector holding `"true"` / `"false"` until submit.
    pub fn boolean(name: &'static str, label: &'static str, on: &'static str, off: &'static str) -> Self {
        Self {
            options: vec![
                SelectOption { value: "true", label: on },
                SelectOption { value: "false", label: off },
            ],
            ..Self::simple(name, label, InputKind::Select, Coercion::Boolean)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn locked(mut self) -> Self {
        self.disabled_on_edit = true;
        self
    }

    pub fn accepts(&self, value: &str) -> bool {
        self.options.is_empty() || value.is_empty() || self.options.iter().any(|o| o.value == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDisplay {
    Plain,
    Badge { on: &'static str, off: &'static str },
}

#[derive(Debug, Clone)]
pub struct Column {
    pub field: &'static str,
    pub display: ColumnDisplay,
}

impl Column {
    pub fn plain(field: &'static str) -> Self {
        Self {
            field,
            display: ColumnDisplay::Plain,
        }
    }

    pub fn badge(field: &'static str, on: &'static str, off: &'static str) -> Self {
        Self {
            field,
            display: ColumnDisplay::Badge { on, off },
        }
    }
}

/// Ordered field names addressing one record for update and delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(Vec<&'static str>);

impl Identity {
    pub fn single(field: &'static str) -> Self {
        Self(vec![field])
    }

    pub fn composite(first: &'static str, second: &'static str) -> Self {
        Self(vec![first, second])
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }

    pub fn key_of(&self, record: &Record) -> Result<IdentityKey, ValidationError> {
        self.0
            .iter()
            .map(|&field| match record.get(field) {
                Some(value) if !value.is_missing() => Ok((field, value.clone())),
                _ => Err(ValidationError::MissingIdentity(field)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(IdentityKey)
    }
}

/// Identity values of one record, in the order the identity declares.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityKey(Vec<(&'static str, FieldValue)>);

impl IdentityKey {
    pub fn values(&self) -> Vec<&FieldValue> {
        self.0.iter().map(|(_, value)| value).collect()
    }

    pub fn parts(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(field, value)| (*field, value))
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, value)| value)
    }
}

/// Path template for a single record plus identity parts the backend
/// expects in the body instead of the path.
#[derive(Debug, Clone)]
pub struct ItemRoute {
    pub template: &'static str,
    pub body_keys: Vec<&'static str>,
}

impl ItemRoute {
    pub fn path(template: &'static str) -> Self {
        Self {
            template,
            body_keys: Vec::new(),
        }
    }

    pub fn with_body_key(mut self, field: &'static str) -> Self {
        self.body_keys.push(field);
        self
    }
}

/// A missing route is a missing capability.
#[derive(Debug, Clone)]
pub struct Routes {
    pub list: &'static str,
    pub create: Option<&'static str>,
    pub update: Option<ItemRoute>,
    pub delete: Option<ItemRoute>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Everything the engine knows about one entity type.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub kind: EntityKind,
    pub title: &'static str,
    /// Singular noun used in form titles.
    pub noun: &'static str,
    pub columns: Vec<Column>,
    pub identity: Identity,
    pub create_fields: Vec<FieldSpec>,
    pub edit_fields: Vec<FieldSpec>,
    pub filter: FilterKind,
    pub routes: Routes,
}

impl Descriptor {
    pub fn can_create(&self) -> bool {
        self.routes.create.is_some()
    }

    pub fn can_update(&self) -> bool {
        self.routes.update.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.routes.delete.is_some()
    }

    pub fn fields(&self, mode: FormMode) -> &[FieldSpec] {
        match mode {
            FormMode::Create => &self.create_fields,
            FormMode::Edit => &self.edit_fields,
        }
    }
}
