use std::collections::BTreeMap;

use ais_api::{FieldValue, Record};

use crate::errors::ValidationError;

use super::descriptor::{Coercion, FieldSpec, FormMode};

/// In-progress form input. Every value stays a string until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft(BTreeMap<String, String>);

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates an edit form from a record snapshot. Booleans become
    /// their selector strings.
    pub fn from_record(record: &Record) -> Self {
        let values = record
            .iter()
            .filter(|(_, value)| !matches!(value, FieldValue::Null))
            .map(|(name, value)| {
                let text = match value {
                    FieldValue::Bool(true) => "true".to_string(),
                    FieldValue::Bool(false) => "false".to_string(),
                    other => other.to_string(),
                };
                (name.to_string(), text)
            })
            .collect();

        Self(values)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormDraft {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Leading integer of `input`, the way a browser's `parseInt` reads it:
/// surrounding whitespace and trailing garbage are ignored.
pub fn parse_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Turns a draft into a typed payload for `mode`.
///
/// Create keeps every integer field, substituting `0` for input that does
/// not parse. Edit sends only what the draft holds and drops integers that
/// do not parse. Booleans are `true` exactly when the selector reads
/// `"true"`. Raw fields pass through untouched.
pub fn coerce(fields: &[FieldSpec], draft: &FormDraft, mode: FormMode) -> Record {
    let mut payload = Record::new();

    for field in fields {
        let value = draft.get(field.name);

        match (field.coercion, value, mode) {
            (Coercion::Integer, value, FormMode::Create) => {
                let raw = value.unwrap_or_default();
                let number = parse_integer(raw).unwrap_or_else(|| {
                    tracing::warn!(field = field.name, raw, "non-numeric input sent as 0");
                    0
                });
                payload.insert(field.name, number);
            }
            (Coercion::Integer, Some(raw), FormMode::Edit) => match parse_integer(raw) {
                Some(number) => payload.insert(field.name, number),
                None => tracing::warn!(field = field.name, raw, "non-numeric input left out"),
            },
            (Coercion::Boolean, Some(raw), _) => payload.insert(field.name, raw == "true"),
            (Coercion::Raw, Some(raw), _) => payload.insert(field.name, raw),
            (_, None, _) => {}
        }
    }

    payload
}

/// Names of required fields the draft leaves blank.
pub fn check_required(fields: &[FieldSpec], draft: &FormDraft) -> Result<(), ValidationError> {
    let missing: Vec<_> = fields
        .iter()
        .filter(|field| field.required)
        .filter(|field| draft.get(field.name).is_none_or(|v| v.trim().is_empty()))
        .map(|field| field.name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sensor_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("room_id", "Room ID").required(),
            FieldSpec::select("type", "Type", ["Температура", "Влажность"]).required(),
            FieldSpec::boolean("active", "Active", "Active", "Inactive"),
        ]
    }

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(parse_integer("7"), Some(7));
        assert_eq!(parse_integer("  42abc"), Some(42));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("+8"), Some(8));
        assert_eq!(parse_integer("12.9"), Some(12));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("-"), None);
    }

    #[test]
    fn test_create_substitutes_zero() {
        let draft: FormDraft = [("room_id", "kitchen"), ("type", "Влажность")].into_iter().collect();

        let payload = coerce(&sensor_fields(), &draft, FormMode::Create);

        assert_eq!(payload.get("room_id"), Some(&FieldValue::Integer(0)));
        assert_eq!(payload.get("type"), Some(&FieldValue::from("Влажность")));
        assert!(!payload.contains("active"));
    }

    #[test]
    fn test_create_keeps_absent_integers() {
        let payload = coerce(&sensor_fields(), &FormDraft::new(), FormMode::Create);
        assert_eq!(payload.get("room_id"), Some(&FieldValue::Integer(0)));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_edit_omits_unparseable_integers() {
        let draft: FormDraft = [("room_id", "x"), ("active", "false")].into_iter().collect();

        let payload = coerce(&sensor_fields(), &draft, FormMode::Edit);

        assert!(!payload.contains("room_id"));
        assert!(!payload.contains("type"));
        assert_eq!(payload.get("active"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn test_boolean_round_trip() {
        let record: Record = [
            ("id", FieldValue::Integer(3)),
            ("room_id", FieldValue::Integer(4)),
            ("active", FieldValue::Bool(true)),
            ("type", FieldValue::Null),
        ]
        .into_iter()
        .collect();

        let draft = FormDraft::from_record(&record);
        assert_eq!(draft.get("active"), Some("true"));
        assert_eq!(draft.get("room_id"), Some("4"));
        assert_eq!(draft.get("type"), None);

        let payload = coerce(&sensor_fields(), &draft, FormMode::Edit);
        assert_eq!(payload.get("active"), Some(&FieldValue::Bool(true)));
        assert_eq!(payload.get("room_id"), Some(&FieldValue::Integer(4)));
    }

    #[test]
    fn test_check_required() {
        let draft: FormDraft = [("room_id", "4"), ("type", "  ")].into_iter().collect();

        assert_eq!(
            check_required(&sensor_fields(), &draft),
            Err(ValidationError::MissingFields(vec!["type"]))
        );

        let draft: FormDraft = [("room_id", "4"), ("type", "Влажность")].into_iter().collect();
        assert_eq!(check_required(&sensor_fields(), &draft), Ok(()));
    }
}
