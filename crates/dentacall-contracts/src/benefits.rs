//! Benefit value types and the canonical benefits document.
//!
//! The field dictionary (in `dentacall-fields`) decides *which* fields exist;
//! this module only defines what a captured value looks like and the
//! container that holds a canonical document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The declared shape of a benefit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Boolean,
    Number,
    Text,
    /// A list of strings, e.g. the fields a representative said were portal-only.
    TextList,
    /// Either a yes/no answer or an amount. Only "deductible met" has this
    /// shape; both meanings have been observed from the call system.
    BooleanOrNumber,
}

impl FieldKind {
    /// Return true if `value` has this kind's JSON shape.
    ///
    /// `null` never matches. An empty string is a valid `Text` value, and an
    /// empty array a valid `TextList`.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Number => value.is_number(),
            FieldKind::Text => value.is_string(),
            FieldKind::TextList => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
            FieldKind::BooleanOrNumber => value.is_boolean() || value.is_number(),
        }
    }
}

/// The schema generation that introduced a field name.
///
/// Ordered oldest first, so `a > b` means `a` is the more recent generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaGeneration {
    /// First structured-output names from the call system (`preventive_coverage`).
    FlatV1,
    /// First persisted camelCase document (`annualMaximum`, `frequencies.bwx`).
    DocumentV1,
    /// Expanded persisted document (`history.*`, `specificCodes.*`).
    DocumentV2,
    /// Prefixed structured-output names (`coverage_preventive`, `frequency_bwx`).
    FlatV2,
    /// The canonical nested paths.
    Canonical,
}

/// A single captured benefit value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
    TextList(Vec<String>),
}

impl FieldValue {
    /// Convert a JSON value already known to match `kind`.
    ///
    /// Returns `None` if the value does not have the kind's shape.
    pub fn from_json(kind: FieldKind, value: &Value) -> Option<Self> {
        if !kind.accepts(value) {
            return None;
        }
        match value {
            Value::Bool(b) => Some(FieldValue::Boolean(*b)),
            Value::Number(n) => Some(FieldValue::Number(n.clone())),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(items) => Some(FieldValue::TextList(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::TextList(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A canonical benefits document: a nested JSON object keyed by category.
///
/// Only the normalizer should construct non-empty documents; everything else
/// treats this as read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenefitsDocument(Map<String, Value>);

impl BenefitsDocument {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a dotted canonical path such as `"coverage.preventive"`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Insert `value` at a dotted path, creating intermediate objects.
    ///
    /// An intermediate segment that already holds a non-object value is
    /// replaced by an object.
    pub fn insert_path(&mut self, path: &str, value: Value) {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut current = &mut self.0;
        for segment in parents {
            let slot = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = match slot {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value);
    }

    /// Serialize to the compact JSON string stored on a verification.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}
