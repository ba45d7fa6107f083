use ais_api::{FieldValue, Record};

use super::descriptor::{Column, ColumnDisplay, Descriptor, FieldSpec, FormMode, InputKind, SelectOption};
use super::filter::{Filter, FilterState};
use super::modal::{Modal, ModalKind, Phase};

pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Badge { positive: bool, label: &'static str },
}

impl Cell {
    pub fn of(column: &Column, value: Option<&FieldValue>) -> Self {
        match column.display {
            ColumnDisplay::Badge { on, off } => {
                let positive = value.is_some_and(FieldValue::is_truthy);
                Cell::Badge {
                    positive,
                    label: if positive { on } else { off },
                }
            }
            ColumnDisplay::Plain => match value {
                Some(value) if !value.is_missing() => Cell::Text(value.to_string()),
                _ => Cell::Text(PLACEHOLDER.to_string()),
            },
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Cell::Text(text) => text,
            Cell::Badge { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Loading,
    Empty(String),
    Rows(Vec<Vec<Cell>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Enabled,
    Disabled,
}

impl Control {
    fn when(enabled: bool) -> Self {
        if enabled { Control::Enabled } else { Control::Disabled }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Control::Enabled)
    }
}

/// Row actions are always present; an unsupported one is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSurface {
    pub refresh: Control,
    pub create: Option<Control>,
    pub edit: Control,
    pub delete: Control,
}

impl ActionSurface {
    pub fn of(descriptor: &Descriptor) -> Self {
        Self {
            refresh: Control::Enabled,
            create: descriptor.can_create().then_some(Control::Enabled),
            edit: Control::when(descriptor.can_update()),
            delete: Control::when(descriptor.can_delete()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    pub label: &'static str,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub title: &'static str,
    pub filter: Option<FilterBar>,
    pub banner: Option<String>,
    pub headers: Vec<String>,
    pub body: Body,
    /// Records on screen, already scoped by the caller.
    pub count: usize,
    pub actions: ActionSurface,
}

impl ListView {
    pub fn build(descriptor: &Descriptor, filter: &Filter, records: &[Record], loading: bool) -> Self {
        let body = if loading {
            Body::Loading
        } else if records.is_empty() {
            let hint = if filter.input().is_empty() {
                "Load the data."
            } else {
                "Check the filter."
            };
            Body::Empty(format!("No data to display. {hint}"))
        } else {
            Body::Rows(
                records
                    .iter()
                    .map(|record| {
                        descriptor
                            .columns
                            .iter()
                            .map(|column| Cell::of(column, record.get(column.field)))
                            .collect()
                    })
                    .collect(),
            )
        };

        let count = match &body {
            Body::Rows(rows) => rows.len(),
            _ => 0,
        };

        let banner = match (filter.state(), filter.kind().label()) {
            (FilterState::Filtered(id), Some(label)) => Some(format!("Filtered by {label} {id}")),
            _ => None,
        };

        Self {
            title: descriptor.title,
            filter: filter.kind().label().map(|label| FilterBar {
                label,
                input: filter.input().to_string(),
            }),
            banner,
            headers: descriptor.columns.iter().map(|c| header_label(c.field)).collect(),
            body,
            count,
            actions: ActionSurface::of(descriptor),
        }
    }
}

/// Column heading: the first underscore becomes a space, then upper case.
pub fn header_label(field: &str) -> String {
    field.replacen('_', " ", 1).to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub value: String,
    pub required: bool,
    pub disabled: bool,
    pub options: Vec<SelectOption>,
}

impl FormField {
    fn of(spec: &FieldSpec, mode: FormMode, value: Option<&str>) -> Self {
        Self {
            name: spec.name,
            label: spec.label,
            input: spec.input,
            value: value.unwrap_or_default().to_string(),
            required: spec.required,
            disabled: mode == FormMode::Edit && spec.disabled_on_edit,
            options: spec.options.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub kind: ModalKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub message: Option<&'static str>,
    pub submitting: bool,
}

impl FormView {
    pub fn build(descriptor: &Descriptor, modal: &Modal) -> Option<Self> {
        let kind = modal.kind()?;
        let submitting = modal.phase() == Some(Phase::Submitting);

        let (title, fields, message) = match (modal.form_mode(), modal.draft()) {
            (Some(mode), Some(draft)) => {
                let verb = match mode {
                    FormMode::Create => "New",
                    FormMode::Edit => "Edit",
                };
                let fields = descriptor
                    .fields(mode)
                    .iter()
                    .map(|spec| FormField::of(spec, mode, draft.get(spec.name)))
                    .collect();
                (format!("{verb} {}", descriptor.noun), fields, None)
            }
            _ => (
                format!("Delete {}", descriptor.noun),
                Vec::new(),
                Some("Are you sure you want to delete this item? This action cannot be undone."),
            ),
        };

        Some(Self {
            kind,
            title,
            fields,
            message,
            submitting,
        })
    }
}
