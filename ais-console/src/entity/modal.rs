use ais_api::Record;

use crate::errors::ValidationError;

use super::coercion::FormDraft;
use super::descriptor::FormMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Create,
    Edit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    Submitting,
}

/// The one form an entity section may have open. Edit and delete hold a
/// snapshot of the selected record, never a reference into the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Modal {
    #[default]
    Closed,
    Create {
        draft: FormDraft,
        phase: Phase,
    },
    Edit {
        record: Record,
        draft: FormDraft,
        phase: Phase,
    },
    Delete {
        record: Record,
        phase: Phase,
    },
}

impl Modal {
    pub fn create() -> Self {
        Modal::Create {
            draft: FormDraft::new(),
            phase: Phase::Open,
        }
    }

    pub fn edit(record: Record) -> Self {
        Modal::Edit {
            draft: FormDraft::from_record(&record),
            record,
            phase: Phase::Open,
        }
    }

    pub fn delete(record: Record) -> Self {
        Modal::Delete {
            record,
            phase: Phase::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn kind(&self) -> Option<ModalKind> {
        match self {
            Modal::Closed => None,
            Modal::Create { .. } => Some(ModalKind::Create),
            Modal::Edit { .. } => Some(ModalKind::Edit),
            Modal::Delete { .. } => Some(ModalKind::Delete),
        }
    }

    pub fn form_mode(&self) -> Option<FormMode> {
        match self {
            Modal::Create { .. } => Some(FormMode::Create),
            Modal::Edit { .. } => Some(FormMode::Edit),
            _ => None,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            Modal::Closed => None,
            Modal::Create { phase, .. } | Modal::Edit { phase, .. } | Modal::Delete { phase, .. } => {
                Some(*phase)
            }
        }
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        match self {
            Modal::Create { draft, .. } | Modal::Edit { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut FormDraft> {
        match self {
            Modal::Create { draft, .. } | Modal::Edit { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Modal::Edit { record, .. } | Modal::Delete { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Replaces a closed modal. Fails while any other form is open.
    pub fn open(&mut self, next: Modal) -> Result<(), ValidationError> {
        if self.is_open() {
            return Err(ValidationError::ModalOpen);
        }
        *self = next;
        Ok(())
    }

    pub fn begin_submit(&mut self) -> Result<(), ValidationError> {
        self.set_phase(Phase::Open, Phase::Submitting)
    }

    /// Back to editable after a rejected submit; the draft is kept.
    pub fn fail(&mut self) -> Result<(), ValidationError> {
        self.set_phase(Phase::Submitting, Phase::Open)
    }

    pub fn close(&mut self) {
        *self = Modal::Closed;
    }

    fn set_phase(&mut self, from: Phase, to: Phase) -> Result<(), ValidationError> {
        match self {
            Modal::Closed => Err(ValidationError::NoModal),
            Modal::Create { phase, .. } | Modal::Edit { phase, .. } | Modal::Delete { phase, .. } => {
                if *phase != from {
                    return Err(ValidationError::Submitting);
                }
                *phase = to;
                Ok(())
            }
        }
    }
}
