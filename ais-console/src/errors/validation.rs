/// Local failures, raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Enter a {parent} to load {entity}")]
    MissingFilter {
        parent: &'static str,
        entity: &'static str,
    },

    #[error("{value:?} is not a valid {parent}")]
    InvalidFilter {
        parent: &'static str,
        value: String,
    },

    #[error("Required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} cannot be changed")]
    FieldLocked(&'static str),

    #[error("{value:?} is not an option for {field}")]
    InvalidOption { field: &'static str, value: String },

    #[error("No row {0} in the displayed list")]
    UnknownRow(usize),

    #[error("Record has no value for {0}")]
    MissingIdentity(&'static str),

    #[error("Another form is already open")]
    ModalOpen,

    #[error("No form is open")]
    NoModal,

    #[error("The form is being submitted")]
    Submitting,

    #[error("{entity} cannot be {action}")]
    Unsupported {
        entity: &'static str,
        action: &'static str,
    },
}
