//! Field-by-field view of a stored verification.
//!
//! Stored benefits may be canonical or any earlier generation, or not JSON
//! at all. Every field is resolved through the dictionary, so the view
//! always lists the full canonical field set and never fails.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use dentacall_contracts::{
    benefits::{FieldValue, SchemaGeneration},
    practice::PracticeId,
    verification::{Verification, VerificationId, VerificationStatus},
};
use dentacall_fields::{categories, fields_in, resolve};

/// Whether a field was captured on the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "kebab-case")]
pub enum Captured {
    Value(FieldValue),
    NotCaptured,
}

impl Captured {
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Captured::Value(v) => Some(v),
            Captured::NotCaptured => None,
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, Captured::Value(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    /// Canonical dotted path.
    pub path: &'static str,
    pub label: &'static str,
    pub captured: Captured,
    /// Generation of the name the value was stored under.
    pub generation: Option<SchemaGeneration>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub key: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldView>,
}

impl CategoryView {
    pub fn captured_count(&self) -> usize {
        self.fields.iter().filter(|f| f.captured.is_captured()).count()
    }
}

/// A stored verification as the dashboard shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationView {
    pub verification_id: VerificationId,
    pub practice_id: PracticeId,
    pub status: VerificationStatus,
    pub patient_name: String,
    #[serde(rename = "patientDOB")]
    pub patient_dob: String,
    pub member_id: String,
    pub insurance_carrier: String,
    pub reference_number: Option<String>,
    pub rep_name: Option<String>,
    pub call_id: Option<String>,
    pub call_duration: Option<String>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,
    pub created_at: DateTime<Utc>,
    /// The stored benefits string was present but not a readable document.
    pub benefits_unreadable: bool,
    pub categories: Vec<CategoryView>,
}

impl VerificationView {
    /// Look up a field by canonical path.
    pub fn field(&self, path: &str) -> Option<&FieldView> {
        self.categories
            .iter()
            .flat_map(|c| c.fields.iter())
            .find(|f| f.path == path)
    }

    /// The captured value at `path`, if any.
    pub fn value(&self, path: &str) -> Option<&FieldValue> {
        self.field(path).and_then(|f| f.captured.value())
    }

    pub fn captured_count(&self) -> usize {
        self.categories.iter().map(CategoryView::captured_count).sum()
    }
}

/// Build the view of `verification`.
pub fn view(verification: &Verification) -> VerificationView {
    let (document, benefits_unreadable) = match verification.benefits.as_deref() {
        None => (Map::new(), false),
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => (map, false),
            Ok(Value::Null) => (Map::new(), false),
            Ok(_) | Err(_) => {
                warn!(
                    verification_id = %verification.id,
                    "stored benefits are not a JSON object; showing nothing captured"
                );
                (Map::new(), true)
            }
        },
    };

    VerificationView {
        verification_id: verification.id,
        practice_id: verification.practice_id.clone(),
        status: verification.status,
        patient_name: verification.patient_name.clone(),
        patient_dob: verification.patient_dob.clone(),
        member_id: verification.member_id.clone(),
        insurance_carrier: verification.insurance_carrier.clone(),
        reference_number: verification.reference_number.clone(),
        rep_name: verification.rep_name.clone(),
        call_id: verification.call_id.clone(),
        call_duration: verification.call_duration.clone(),
        recording_url: verification.recording_url.clone(),
        transcript: verification.transcript.clone(),
        created_at: verification.created_at,
        benefits_unreadable,
        categories: view_document(&document),
    }
}

/// Every category and field of the dictionary, resolved against `document`.
pub fn view_document(document: &Map<String, Value>) -> Vec<CategoryView> {
    categories()
        .iter()
        .map(|category| CategoryView {
            key: category.key,
            title: category.title,
            fields: fields_in(category.key)
                .map(|field| match resolve(document, field) {
                    Some(hit) => FieldView {
                        path: field.path,
                        label: field.label,
                        captured: Captured::Value(hit.value),
                        generation: Some(hit.generation),
                    },
                    None => FieldView {
                        path: field.path,
                        label: field.label,
                        captured: Captured::NotCaptured,
                        generation: None,
                    },
                })
                .collect(),
        })
        .collect()
}
