use std::fmt;

use ais_api::Id;

use crate::errors::ValidationError;

use super::descriptor::FilterKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// Parent identifier the last successful refresh was scoped to.
    Filtered(Id),
}

/// What a load is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    Parent(Id),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => f.write_str("all"),
            Scope::Parent(id) => write!(f, "{id}"),
        }
    }
}

/// Pending parent identifier plus the value last applied to a refresh.
/// Typing into the filter never loads anything by itself.
#[derive(Debug, Clone)]
pub struct Filter {
    kind: FilterKind,
    entity: &'static str,
    input: String,
    state: FilterState,
}

impl Filter {
    pub fn new(kind: FilterKind, entity: &'static str) -> Self {
        Self {
            kind,
            entity,
            input: String::new(),
            state: FilterState::Unfiltered,
        }
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn enter(&mut self, value: impl Into<String>) {
        self.input = value.into().trim().to_string();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Scope a refresh would use right now. A scoped entity needs the input
    /// to be a parent identifier.
    pub fn scope(&self) -> Result<Scope, ValidationError> {
        match self.kind.label() {
            None => Ok(Scope::All),
            Some(parent) if self.input.is_empty() => Err(ValidationError::MissingFilter {
                parent,
                entity: self.entity,
            }),
            Some(parent) => self
                .input
                .parse::<Id>()
                .map(Scope::Parent)
                .map_err(|_| ValidationError::InvalidFilter {
                    parent,
                    value: self.input.clone(),
                }),
        }
    }

    /// Commits the pending input ahead of a refresh.
    pub fn apply(&mut self) -> Result<Scope, ValidationError> {
        let scope = self.scope()?;
        self.state = match &scope {
            Scope::All => FilterState::Unfiltered,
            Scope::Parent(id) => FilterState::Filtered(*id),
        };
        Ok(scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_entities_load_everything() {
        let mut filter = Filter::new(FilterKind::None, "companies");
        filter.enter("12");
        assert_eq!(filter.apply(), Ok(Scope::All));
        assert_eq!(filter.state(), &FilterState::Unfiltered);
    }

    #[test]
    fn test_entering_does_not_apply() {
        let mut filter = Filter::new(FilterKind::RoomId, "sensors");
        filter.enter(" 4 ");

        assert_eq!(filter.input(), "4");
        assert_eq!(filter.state(), &FilterState::Unfiltered);

        assert_eq!(filter.apply(), Ok(Scope::Parent(4)));
        assert_eq!(filter.state(), &FilterState::Filtered(4));
    }

    #[test]
    fn test_empty_input_rejected() {
        let mut filter = Filter::new(FilterKind::CompanyId, "rooms");
        filter.enter("   ");

        let error = filter.apply().unwrap_err();
        assert_eq!(error.to_string(), "Enter a company ID to load rooms");
        assert_eq!(filter.state(), &FilterState::Unfiltered);
    }

    #[test]
    fn test_failed_apply_keeps_previous_state() {
        let mut filter = Filter::new(FilterKind::SensorId, "events");
        filter.enter("9");
        filter.apply().unwrap();
        filter.enter("");

        assert!(filter.apply().is_err());
        assert_eq!(filter.state(), &FilterState::Filtered(9));
    }

    #[test]
    fn test_non_numeric_input_rejected() {
        let mut filter = Filter::new(FilterKind::CompanyId, "rooms");

        for input in ["..", "abc", r"1\2", "4/..", "12abc"] {
            filter.enter(input);
            assert_eq!(
                filter.apply(),
                Err(ValidationError::InvalidFilter {
                    parent: "company ID",
                    value: input.to_string(),
                })
            );
        }
        assert_eq!(filter.state(), &FilterState::Unfiltered);

        filter.enter("7");
        assert_eq!(filter.apply(), Ok(Scope::Parent(7)));
    }
}
