//! A stand-in for the outbound voice platform.

use std::sync::{Arc, Mutex};

use tracing::debug;

use dentacall_contracts::{
    call::{CallPlacement, CallReference},
    error::{DentacallError, DentacallResult},
};
use dentacall_core::traits::CallTrigger;

/// Records every placement and hands back sequential call ids.
///
/// Clones share the recorded placements.
#[derive(Debug, Clone, Default)]
pub struct MockCallTrigger {
    placements: Arc<Mutex<Vec<CallPlacement>>>,
    failure: Option<String>,
}

impl MockCallTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A trigger whose every call fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Every placement attempted so far, including failed ones.
    pub fn placements(&self) -> Vec<CallPlacement> {
        self.placements.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl CallTrigger for MockCallTrigger {
    fn place_call(&self, placement: &CallPlacement) -> DentacallResult<CallReference> {
        let mut placements = self.placements.lock().map_err(|e| DentacallError::CallTriggerFailed {
            reason: format!("mock trigger lock poisoned: {}", e),
        })?;
        placements.push(placement.clone());

        if let Some(reason) = &self.failure {
            return Err(DentacallError::CallTriggerFailed { reason: reason.clone() });
        }

        let call_id = format!("call-{:04}", placements.len());
        debug!(
            verification_id = %placement.verification_id,
            call_id = %call_id,
            phone_number = %placement.phone_number,
            "mock call placed"
        );
        Ok(CallReference { call_id })
    }
}
