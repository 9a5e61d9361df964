//! Seam traits for the call-outcome pipeline.
//!
//! The service wires these together in a fixed order:
//!
//! - `PayloadExtractor`   turns an arbitrary webhook payload into candidate fields
//! - `BenefitsNormalizer` reduces candidate fields to one canonical document
//! - `StatusClassifier`   decides `completed` or `failed`, once per verification
//! - `VerificationStore`  persists records and applies the terminal transition
//! - `ChangeJournal`      receives every committed mutation
//! - `CallTrigger`        places the outbound call (external collaborator)
//!
//! Extraction, normalization and classification are pure and infallible: a
//! malformed payload degrades to "not captured", never to an error.

use serde_json::{Map, Value};

use dentacall_contracts::{
    benefits::BenefitsDocument,
    call::{CallPlacement, CallReference, CallTelemetry, ExtractedCall},
    error::DentacallResult,
    journal::ChangeRecord,
    practice::{Practice, PracticeId},
    verification::{
        NewVerification, TerminalOutcome, TerminalUpdate, Verification, VerificationId,
        VerificationPatch, VerificationStatus,
    },
};

/// Reads candidate fields, identity, and telemetry out of a raw event.
pub trait PayloadExtractor: Send + Sync {
    /// Extract everything the pipeline needs from `payload`.
    ///
    /// Must not fail or panic for any JSON value. Anything that cannot be
    /// found is left absent in the result.
    fn extract(&self, payload: &Value) -> ExtractedCall;
}

/// Reduces candidate fields of any schema generation to canonical form.
pub trait BenefitsNormalizer: Send + Sync {
    /// Normalize a flat bag of structured-output fields.
    fn normalize(&self, fields: &Map<String, Value>) -> BenefitsDocument;

    /// Normalize a whole document (stored or operator-supplied) of any
    /// generation. Non-object input yields an empty document.
    fn normalize_document(&self, document: &Value) -> BenefitsDocument {
        match document {
            Value::Object(map) => self.normalize(map),
            _ => BenefitsDocument::new(),
        }
    }
}

/// Decides the terminal status of a call.
pub trait StatusClassifier: Send + Sync {
    /// Return true if an event of this type closes out a call.
    fn is_terminal_event(&self, event_type: &str) -> bool;

    /// Classify a finished call. Always returns a terminal status.
    fn classify(&self, benefits: &BenefitsDocument, telemetry: &CallTelemetry)
        -> VerificationStatus;
}

/// Per-practice verification persistence.
///
/// Implementations must make `update_terminal` conditional: it applies only
/// while the record is still `in_progress`, and of two concurrent callers at
/// most one observes `TerminalOutcome::Applied`.
pub trait VerificationStore: Send + Sync {
    /// Fetch a practice. Returns `PracticeNotFound` if it does not exist.
    fn get_practice(&self, practice_id: &PracticeId) -> DentacallResult<Practice>;

    /// Create an `in_progress` verification and return its id.
    ///
    /// Rejects unknown practices with `PracticeNotFound`.
    fn create(&self, new: NewVerification) -> DentacallResult<VerificationId>;

    /// Returns `VerificationNotFound` if no record has this id.
    fn get_by_id(&self, id: VerificationId) -> DentacallResult<Verification>;

    /// Find the verification whose call has the given external reference.
    fn find_by_call_id(&self, call_id: &str) -> DentacallResult<Option<Verification>>;

    /// Apply the single terminal transition if the record is still
    /// `in_progress`; otherwise report the status it already has.
    fn update_terminal(
        &self,
        id: VerificationId,
        update: TerminalUpdate,
    ) -> DentacallResult<TerminalOutcome>;

    /// Apply an operator correction. Never re-opens a terminal record.
    fn update(&self, id: VerificationId, patch: VerificationPatch)
        -> DentacallResult<Verification>;

    /// All verifications of a practice, newest first.
    fn list_by_practice(&self, practice_id: &PracticeId) -> DentacallResult<Vec<Verification>>;

    fn delete(&self, id: VerificationId) -> DentacallResult<()>;
}

/// Append-only sink for committed mutations.
///
/// A failed append is fatal to the mutation that produced it: the store
/// returns `PersistenceFailed` and leaves the record unchanged.
pub trait ChangeJournal: Send + Sync {
    fn append(&self, change: &ChangeRecord) -> DentacallResult<()>;
}

/// Places an outbound verification call.
pub trait CallTrigger: Send + Sync {
    /// Ask the external call system to place the call.
    ///
    /// The placement's verification id must be attached to the call so the
    /// outcome event can be correlated back to the record.
    fn place_call(&self, placement: &CallPlacement) -> DentacallResult<CallReference>;
}
