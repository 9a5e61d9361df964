//! Practice-level history summary.

use serde::Serialize;

use dentacall_contracts::verification::{Verification, VerificationStatus};

/// Staff time one completed verification replaces.
pub const HOURS_SAVED_PER_VERIFICATION: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSummary {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub failed: usize,
    /// Rounded to whole hours.
    pub hours_saved: u64,
}

pub fn summarize_practice(verifications: &[Verification]) -> PracticeSummary {
    let mut summary = PracticeSummary { total: verifications.len(), ..PracticeSummary::default() };
    for v in verifications {
        match v.status {
            VerificationStatus::InProgress => summary.in_progress += 1,
            VerificationStatus::Completed => summary.completed += 1,
            VerificationStatus::Failed => summary.failed += 1,
        }
    }
    summary.hours_saved = (summary.completed as f64 * HOURS_SAVED_PER_VERIFICATION).round() as u64;
    summary
}
