//! Typed, precedence-ordered lookup of a dictionary field in a JSON object.

use serde_json::{Map, Value};
use tracing::debug;

use dentacall_contracts::benefits::{FieldKind, FieldValue, SchemaGeneration};

use crate::dictionary::{Alias, BenefitField, RecordField};

/// The value a field resolved to and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: FieldValue,
    pub generation: SchemaGeneration,
    /// The path that supplied the value.
    pub source: &'static str,
}

/// Walk a dotted path through nested objects.
///
/// Returns `None` if any segment is missing, any intermediate value is not an
/// object, or the leaf is JSON `null`.
pub fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    (!current.is_null()).then_some(current)
}

/// Resolve `field` in `root`.
///
/// The canonical path wins if it holds a value of the field's kind. Otherwise
/// the first alias (newest generation) holding a correctly typed value wins.
/// `null` and wrongly typed values are treated as absent.
pub fn resolve(root: &Map<String, Value>, field: &BenefitField) -> Option<Resolved> {
    let canonical = Alias { path: field.path, generation: SchemaGeneration::Canonical };
    std::iter::once(&canonical)
        .chain(field.aliases.iter())
        .find_map(|alias| typed_at(root, field.kind, alias))
}

/// Resolve a verification-level field from a flat structured result.
///
/// Empty strings count as absent here: an empty identity value is never an
/// answer.
pub fn resolve_record(root: &Map<String, Value>, field: &RecordField) -> Option<String> {
    field.aliases.iter().find_map(|alias| {
        let Resolved { value, .. } = typed_at(root, FieldKind::Text, alias)?;
        match value {
            FieldValue::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    })
}

fn typed_at(root: &Map<String, Value>, kind: FieldKind, alias: &Alias) -> Option<Resolved> {
    let raw = lookup(root, alias.path)?;
    match FieldValue::from_json(kind, raw) {
        Some(value) => Some(Resolved { value, generation: alias.generation, source: alias.path }),
        None => {
            if !raw.is_object() {
                debug!(
                    path = alias.path,
                    expected = ?kind,
                    "ignoring value of unexpected shape"
                );
            }
            None
        }
    }
}
