//! Change records appended to the store's journal.
//!
//! Every committed mutation of a verification produces one `ChangeRecord`.
//! The journal is written before the in-memory commit, so a record that is
//! not in the journal was never visible to readers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::practice::PracticeId;
use crate::verification::{Verification, VerificationId, VerificationStatus};

/// What kind of mutation a change record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeKind {
    Created,
    /// The single `in_progress` → terminal transition.
    Terminal,
    /// An operator correction.
    Corrected,
    Deleted,
}

/// One committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub verification_id: VerificationId,
    pub practice_id: PracticeId,
    pub kind: ChangeKind,
    /// Status after the change (before it, for deletions).
    pub status: VerificationStatus,
    /// Full record after the change. Absent for deletions.
    pub snapshot: Option<Verification>,
    pub recorded_at: DateTime<Utc>,
}

impl ChangeRecord {
    /// Record the state of `verification` after a `kind` mutation.
    pub fn of(kind: ChangeKind, verification: &Verification) -> Self {
        Self {
            verification_id: verification.id,
            practice_id: verification.practice_id.clone(),
            kind,
            status: verification.status,
            snapshot: Some(verification.clone()),
            recorded_at: Utc::now(),
        }
    }

    /// Record the deletion of `verification`.
    pub fn deleted(verification: &Verification) -> Self {
        Self {
            snapshot: None,
            ..Self::of(ChangeKind::Deleted, verification)
        }
    }
}
