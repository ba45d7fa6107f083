use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single scalar as it appears in a backend payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// `Null` and empty text have nothing to show.
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Truthiness used by two-state badges.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Integer(i) => *i != 0,
            FieldValue::Float(f) => *f != 0.0 && !f.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Null => false,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Field name to scalar mapping, shaped by whichever entity produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn insert<K: Into<String>, V: Into<FieldValue>>(&mut self, field: K, value: V) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), scalar_to_json(v)))
                .collect(),
        )
    }
}

fn scalar_to_json(value: &FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Bool(b) => serde_json::Value::Bool(*b),
        FieldValue::Integer(i) => serde_json::Value::from(*i),
        FieldValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        FieldValue::Text(s) => serde_json::Value::String(s.clone()),
        FieldValue::Null => serde_json::Value::Null,
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_backend_row() {
        let record: Record = serde_json::from_value(json!({
            "id": 3,
            "room_id": 4,
            "type": "Температура",
            "active": true,
            "description": null,
            "value": 21.5
        }))
        .unwrap();

        assert_eq!(record.get("id"), Some(&FieldValue::Integer(3)));
        assert_eq!(record.get("type"), Some(&FieldValue::from("Температура")));
        assert_eq!(record.get("active"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("description"), Some(&FieldValue::Null));
        assert_eq!(record.get("value"), Some(&FieldValue::Float(21.5)));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Float(30.0).to_string(), "30");
        assert_eq!(FieldValue::Float(20.5).to_string(), "20.5");
        assert_eq!(FieldValue::Bool(false).to_string(), "false");
        assert_eq!(FieldValue::Null.to_string(), "");
    }

    #[test]
    fn test_missing_and_truthy() {
        assert!(FieldValue::Null.is_missing());
        assert!(FieldValue::from("").is_missing());
        assert!(!FieldValue::Integer(0).is_missing());
        assert!(!FieldValue::Integer(0).is_truthy());
        assert!(FieldValue::Bool(true).is_truthy());
    }

    #[test]
    fn test_to_value() {
        let record: Record = [
            ("company_id", FieldValue::Integer(7)),
            ("name", FieldValue::from("Server Room")),
        ]
        .into_iter()
        .collect();

        assert_eq!(record.to_value(), json!({"company_id": 7, "name": "Server Room"}));
    }
}
