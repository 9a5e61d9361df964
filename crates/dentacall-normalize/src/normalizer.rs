//! Dictionary-driven normalization.
//!
//! For every dictionary field the canonical path wins if it holds a value of
//! the field's kind; otherwise the newest alias holding one does; otherwise
//! the field is omitted. The output is built from canonical paths only, so
//! normalizing a canonical document returns it unchanged.

use serde_json::{Map, Value};
use tracing::debug;

use dentacall_contracts::benefits::{BenefitsDocument, SchemaGeneration};
use dentacall_core::traits::BenefitsNormalizer;
use dentacall_fields::{benefit_fields, resolve};

/// The `BenefitsNormalizer` backed by the benefit field dictionary.
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionaryNormalizer;

impl DictionaryNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl BenefitsNormalizer for DictionaryNormalizer {
    fn normalize(&self, fields: &Map<String, Value>) -> BenefitsDocument {
        normalize_fields(fields)
    }
}

/// Reduce an object of any generation to a canonical benefits document.
pub fn normalize_fields(fields: &Map<String, Value>) -> BenefitsDocument {
    let mut document = BenefitsDocument::new();
    let mut from_aliases = 0usize;

    for field in benefit_fields() {
        let Some(hit) = resolve(fields, field) else {
            continue;
        };
        if hit.generation != SchemaGeneration::Canonical {
            from_aliases += 1;
            debug!(
                field = field.path,
                source = hit.source,
                generation = ?hit.generation,
                "field taken from alias"
            );
        }
        document.insert_path(field.path, hit.value.to_json());
    }

    debug!(
        input_fields = fields.len(),
        captured_categories = document.as_map().len(),
        from_aliases,
        "benefits normalized"
    );
    document
}
