//! Error types for the dentacall verification pipeline.
//!
//! All fallible operations in the workspace return `DentacallResult<T>`.
//! Malformed inbound call payloads are deliberately absent from this list:
//! the extractor represents missing data as absence, never as an error.

use thiserror::Error;

/// The unified error type for the dentacall crates.
#[derive(Debug, Error)]
pub enum DentacallError {
    /// A required intake field was absent or blank.
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// The phone number could not be normalized to a US E.164 number.
    #[error("invalid phone number '{input}': expected a 10-digit US phone number")]
    InvalidPhoneNumber { input: String },

    /// A date of birth was not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    /// The practice a verification should belong to does not exist.
    #[error("practice '{practice_id}' not found")]
    PracticeNotFound { practice_id: String },

    /// No verification exists with the given id.
    #[error("verification '{id}' not found")]
    VerificationNotFound { id: String },

    /// A status change that would break the lifecycle rules.
    #[error("invalid status transition for verification '{id}': {reason}")]
    InvalidTransition { id: String, reason: String },

    /// The external call system refused or failed to place the call.
    ///
    /// The associated verification has already been marked `failed` by the
    /// time this error reaches the caller.
    #[error("failed to start verification call: {reason}")]
    CallTriggerFailed { reason: String },

    /// The store or its change journal could not persist a mutation.
    ///
    /// No partial state is left behind when this is returned.
    #[error("persistence failed: {reason}")]
    PersistenceFailed { reason: String },

    /// A configuration document is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A document could not be serialized for storage.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

/// Convenience alias used throughout the dentacall crates.
pub type DentacallResult<T> = Result<T, DentacallError>;
