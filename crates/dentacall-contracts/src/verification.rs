//! The verification record and the mutations the store accepts.
//!
//! A verification is created `in_progress` when a call is placed, moves to a
//! terminal status exactly once when the call-outcome event arrives, and may
//! afterwards receive operator corrections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::call::{Attribution, CallTelemetry, IdentityFields};
use crate::practice::{ActorId, PracticeId};

/// Unique identifier of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationId(pub uuid::Uuid);

impl VerificationId {
    /// Create a new, unique verification id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parse the textual form used in call metadata and URLs.
    pub fn parse(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl Default for VerificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VerificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    InProgress,
    Completed,
    Failed,
}

impl VerificationStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, VerificationStatus::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::InProgress => "in_progress",
            VerificationStatus::Completed => "completed",
            VerificationStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound-call attempt and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub id: VerificationId,
    pub practice_id: PracticeId,

    pub patient_name: String,
    /// Spoken form, e.g. "January 5, 1990".
    #[serde(rename = "patientDOB")]
    pub patient_dob: String,
    pub member_id: String,
    pub insurance_carrier: String,
    pub phone_number: String,

    pub status: VerificationStatus,

    pub call_id: Option<String>,
    /// "<m> min <s> sec".
    pub call_duration: Option<String>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,

    /// Serialized benefits document. `None` while `in_progress`.
    ///
    /// Documents written from now on are canonical; older rows may hold any
    /// earlier generation, so readers go through the presentation adapter.
    pub benefits: Option<String>,

    pub reference_number: Option<String>,
    pub rep_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by_id: ActorId,
}

/// Fields supplied when a verification is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVerification {
    pub practice_id: PracticeId,
    pub patient_name: String,
    pub patient_dob: String,
    pub member_id: String,
    pub insurance_carrier: String,
    pub phone_number: String,
    pub created_by_id: ActorId,
}

/// The single terminal mutation of a verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalUpdate {
    /// Must be `Completed` or `Failed`.
    pub status: VerificationStatus,
    /// Serialized canonical benefits document, if any data was captured.
    pub benefits: Option<String>,
    pub telemetry: CallTelemetry,
    pub attribution: Attribution,
    /// Identity resolved from the call. Only fills subject fields that are
    /// still blank on the stored record; intake values are authoritative.
    pub identity: IdentityFields,
}

impl TerminalUpdate {
    /// A `failed` update carrying only whatever telemetry was salvaged.
    pub fn failed(telemetry: CallTelemetry) -> Self {
        Self {
            status: VerificationStatus::Failed,
            benefits: None,
            telemetry,
            attribution: Attribution::default(),
            identity: IdentityFields::default(),
        }
    }
}

/// Result of a conditional terminal update.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalOutcome {
    /// The transition was applied; carries the updated record.
    Applied(Verification),
    /// The record had already left `in_progress`; nothing was changed.
    AlreadyTerminal { status: VerificationStatus },
}

/// An operator correction. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPatch {
    pub patient_name: Option<String>,
    #[serde(rename = "patientDOB")]
    pub patient_dob: Option<String>,
    pub member_id: Option<String>,
    pub insurance_carrier: Option<String>,
    pub phone_number: Option<String>,
    pub status: Option<VerificationStatus>,
    pub call_id: Option<String>,
    pub call_duration: Option<String>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,
    /// Replacement benefits document (JSON). The service normalizes it to
    /// the canonical shape before it reaches the store.
    pub benefits: Option<serde_json::Value>,
    pub reference_number: Option<String>,
    pub rep_name: Option<String>,
}

impl VerificationPatch {
    /// A patch that only records the external call reference.
    pub fn call_id(call_id: impl Into<String>) -> Self {
        Self {
            call_id: Some(call_id.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
