//! Field access for list records

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// A single field value as seen by filters, search and sort
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    /// Whole numbers that must keep every digit, such as JSON ids above 2^53
    Integer(i128),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl FieldValue {
    /// String form used for equality filters and search.
    ///
    /// Integral numbers print without a fractional part, so `1.0` reads "1".
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Timestamp(ts) => Cow::Owned(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            FieldValue::Text(s) => Cow::Borrowed(s),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Integer(_) | FieldValue::Number(_) => 1,
            FieldValue::Timestamp(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// Total order for sorting: same-kind values compare naturally,
    /// different kinds compare by kind. Integers and floats share a kind.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Number(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Number(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Integer(n.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

/// Missing values sort before present ones
pub fn compare_optional(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    }
}

/// An identifier-bearing item shown in a list page
pub trait Record {
    /// Stable identifier
    fn id(&self) -> Cow<'_, str>;

    /// Named field, or `None` when the record has no such field (or it is null)
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Every present field value, for searches across all columns
    fn field_values(&self) -> Vec<FieldValue>;
}

fn json_field(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(FieldValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(FieldValue::from)
            .or_else(|| n.as_u64().map(FieldValue::from))
            .or_else(|| n.as_f64().map(FieldValue::Number)),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Some(FieldValue::Text(value.to_string())),
    }
}

/// Raw JSON objects, as returned by the admin API, are records too.
/// The identifier is `id`, falling back to `_id`.
impl Record for Value {
    fn id(&self) -> Cow<'_, str> {
        match self.get("id").or_else(|| self.get("_id")) {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(Value::Null) | None => Cow::Borrowed(""),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.as_object()
            .and_then(|obj| obj.get(name))
            .and_then(json_field)
    }

    fn field_values(&self) -> Vec<FieldValue> {
        match self.as_object() {
            Some(obj) => obj.values().filter_map(json_field).collect(),
            None => Vec::new(),
        }
    }
}
