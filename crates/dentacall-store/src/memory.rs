//! In-memory implementation of `VerificationStore`.
//!
//! Every mutation runs under one lock in four steps: check, stage the new
//! record on a copy, append the change to the journal, commit the copy. A
//! journal failure leaves the stored record untouched, and the status check
//! in `update_terminal` cannot interleave with another writer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info};

use dentacall_contracts::{
    error::{DentacallError, DentacallResult},
    journal::{ChangeKind, ChangeRecord},
    practice::{Practice, PracticeId},
    verification::{
        NewVerification, TerminalOutcome, TerminalUpdate, Verification, VerificationId,
        VerificationPatch, VerificationStatus,
    },
};
use dentacall_core::traits::{ChangeJournal, VerificationStore};

use crate::journal::InMemoryChangeJournal;

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct StoreState {
    pub(crate) practices: HashMap<PracticeId, Practice>,
    pub(crate) records: HashMap<VerificationId, Verification>,
    /// Record ids in creation order.
    pub(crate) order: Vec<VerificationId>,
}

// ── Public store ──────────────────────────────────────────────────────────────

/// A verification store held entirely in memory.
///
/// Clones share the same records and journal.
#[derive(Clone)]
pub struct InMemoryVerificationStore {
    pub(crate) state: Arc<Mutex<StoreState>>,
    journal: Arc<dyn ChangeJournal>,
}

impl InMemoryVerificationStore {
    /// An empty store journaling to a fresh `InMemoryChangeJournal`.
    pub fn new() -> Self {
        Self::with_journal(Arc::new(InMemoryChangeJournal::new()))
    }

    /// An empty store journaling to `journal`.
    pub fn with_journal(journal: Arc<dyn ChangeJournal>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                practices: HashMap::new(),
                records: HashMap::new(),
                order: Vec::new(),
            })),
            journal,
        }
    }

    /// Builder form of `add_practice`.
    pub fn with_practice(self, practice: Practice) -> DentacallResult<Self> {
        self.add_practice(practice)?;
        Ok(self)
    }

    /// Register (or replace) a practice.
    pub fn add_practice(&self, practice: Practice) -> DentacallResult<()> {
        let mut state = self.lock()?;
        state.practices.insert(practice.id.clone(), practice);
        Ok(())
    }

    /// Insert a record as-is, bypassing the create path.
    ///
    /// Used to load rows written by earlier versions, whose benefits may be
    /// in any schema generation. The insert is journaled like any creation.
    pub fn import(&self, record: Verification) -> DentacallResult<()> {
        let mut state = self.lock()?;
        if !state.practices.contains_key(&record.practice_id) {
            return Err(DentacallError::PracticeNotFound {
                practice_id: record.practice_id.to_string(),
            });
        }
        self.commit(&mut state, ChangeKind::Created, record)?;
        Ok(())
    }

    fn lock(&self) -> DentacallResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|e| DentacallError::PersistenceFailed {
            reason: format!("store lock poisoned: {}", e),
        })
    }

    /// Journal `staged`, then make it visible. Nothing is stored if the
    /// journal rejects the change.
    fn commit(
        &self,
        state: &mut StoreState,
        kind: ChangeKind,
        staged: Verification,
    ) -> DentacallResult<Verification> {
        self.journal
            .append(&ChangeRecord::of(kind, &staged))
            .map_err(as_persistence_failure)?;

        if !state.records.contains_key(&staged.id) {
            state.order.push(staged.id);
        }
        state.records.insert(staged.id, staged.clone());
        Ok(staged)
    }
}

impl Default for InMemoryVerificationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn as_persistence_failure(e: DentacallError) -> DentacallError {
    match e {
        e @ DentacallError::PersistenceFailed { .. } => e,
        other => DentacallError::PersistenceFailed {
            reason: other.to_string(),
        },
    }
}

fn not_found(id: VerificationId) -> DentacallError {
    DentacallError::VerificationNotFound { id: id.to_string() }
}

/// Overwrite `slot` only if it is blank.
fn fill_blank(slot: &mut String, candidate: Option<String>) {
    if slot.trim().is_empty() {
        if let Some(value) = candidate.filter(|v| !v.trim().is_empty()) {
            *slot = value;
        }
    }
}

// ── VerificationStore impl ────────────────────────────────────────────────────

impl VerificationStore for InMemoryVerificationStore {
    fn get_practice(&self, practice_id: &PracticeId) -> DentacallResult<Practice> {
        let state = self.lock()?;
        state
            .practices
            .get(practice_id)
            .cloned()
            .ok_or_else(|| DentacallError::PracticeNotFound {
                practice_id: practice_id.to_string(),
            })
    }

    fn create(&self, new: NewVerification) -> DentacallResult<VerificationId> {
        let mut state = self.lock()?;
        if !state.practices.contains_key(&new.practice_id) {
            return Err(DentacallError::PracticeNotFound {
                practice_id: new.practice_id.to_string(),
            });
        }

        let now = Utc::now();
        let record = Verification {
            id: VerificationId::new(),
            practice_id: new.practice_id,
            patient_name: new.patient_name,
            patient_dob: new.patient_dob,
            member_id: new.member_id,
            insurance_carrier: new.insurance_carrier,
            phone_number: new.phone_number,
            status: VerificationStatus::InProgress,
            call_id: None,
            call_duration: None,
            recording_url: None,
            transcript: None,
            benefits: None,
            reference_number: None,
            rep_name: None,
            created_at: now,
            updated_at: now,
            created_by_id: new.created_by_id,
        };

        let record = self.commit(&mut state, ChangeKind::Created, record)?;
        info!(
            verification_id = %record.id,
            practice_id = %record.practice_id,
            "verification created"
        );
        Ok(record.id)
    }

    fn get_by_id(&self, id: VerificationId) -> DentacallResult<Verification> {
        let state = self.lock()?;
        state.records.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    fn find_by_call_id(&self, call_id: &str) -> DentacallResult<Option<Verification>> {
        let state = self.lock()?;
        Ok(state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.records.get(id))
            .find(|v| v.call_id.as_deref() == Some(call_id))
            .cloned())
    }

    fn update_terminal(
        &self,
        id: VerificationId,
        update: TerminalUpdate,
    ) -> DentacallResult<TerminalOutcome> {
        if !update.status.is_terminal() {
            return Err(DentacallError::InvalidTransition {
                id: id.to_string(),
                reason: "a terminal update must set completed or failed".to_string(),
            });
        }

        let mut state = self.lock()?;
        let current = state.records.get(&id).ok_or_else(|| not_found(id))?;

        if current.status.is_terminal() {
            debug!(
                verification_id = %id,
                status = %current.status,
                "terminal update skipped; record already terminal"
            );
            return Ok(TerminalOutcome::AlreadyTerminal { status: current.status });
        }

        let mut staged = current.clone();
        let TerminalUpdate { status, benefits, telemetry, attribution, identity } = update;

        staged.status = status;
        staged.benefits = benefits;
        staged.call_id = staged.call_id.take().or(telemetry.call_id);
        staged.call_duration = telemetry.duration.map(|d| d.to_string());
        staged.recording_url = telemetry.recording_url;
        staged.transcript = telemetry.transcript;
        staged.reference_number = attribution.reference_number;
        staged.rep_name = attribution.rep_name;

        fill_blank(&mut staged.patient_name, identity.patient_name);
        fill_blank(&mut staged.patient_dob, identity.patient_dob);
        fill_blank(&mut staged.member_id, identity.member_id);
        fill_blank(&mut staged.insurance_carrier, identity.insurance_carrier);

        staged.updated_at = Utc::now();

        let committed = self.commit(&mut state, ChangeKind::Terminal, staged)?;
        info!(
            verification_id = %committed.id,
            status = %committed.status,
            call_duration = ?committed.call_duration,
            "terminal status recorded"
        );
        Ok(TerminalOutcome::Applied(committed))
    }

    fn update(
        &self,
        id: VerificationId,
        patch: VerificationPatch,
    ) -> DentacallResult<Verification> {
        let mut state = self.lock()?;
        let current = state.records.get(&id).ok_or_else(|| not_found(id))?;

        if patch.is_empty() {
            return Ok(current.clone());
        }

        if let Some(status) = patch.status {
            if !status.is_terminal() {
                return Err(DentacallError::InvalidTransition {
                    id: id.to_string(),
                    reason: "status cannot move back to in_progress".to_string(),
                });
            }
            if !current.status.is_terminal() {
                return Err(DentacallError::InvalidTransition {
                    id: id.to_string(),
                    reason: "an in_progress record only leaves in_progress through its call outcome"
                        .to_string(),
                });
            }
        }

        if patch.benefits.is_some() && !current.status.is_terminal() {
            return Err(DentacallError::InvalidTransition {
                id: id.to_string(),
                reason: "benefits are written by the call outcome while in_progress".to_string(),
            });
        }

        let mut staged = current.clone();
        let VerificationPatch {
            patient_name,
            patient_dob,
            member_id,
            insurance_carrier,
            phone_number,
            status,
            call_id,
            call_duration,
            recording_url,
            transcript,
            benefits,
            reference_number,
            rep_name,
        } = patch;

        if let Some(v) = patient_name {
            staged.patient_name = v;
        }
        if let Some(v) = patient_dob {
            staged.patient_dob = v;
        }
        if let Some(v) = member_id {
            staged.member_id = v;
        }
        if let Some(v) = insurance_carrier {
            staged.insurance_carrier = v;
        }
        if let Some(v) = phone_number {
            staged.phone_number = v;
        }
        if let Some(v) = status {
            staged.status = v;
        }
        if call_id.is_some() {
            staged.call_id = call_id;
        }
        if call_duration.is_some() {
            staged.call_duration = call_duration;
        }
        if recording_url.is_some() {
            staged.recording_url = recording_url;
        }
        if transcript.is_some() {
            staged.transcript = transcript;
        }
        if reference_number.is_some() {
            staged.reference_number = reference_number;
        }
        if rep_name.is_some() {
            staged.rep_name = rep_name;
        }
        if let Some(document) = benefits {
            staged.benefits = match document {
                serde_json::Value::Null => None,
                other => Some(serde_json::to_string(&other).map_err(|e| {
                    DentacallError::Serialization {
                        reason: format!("benefits for {}: {}", id, e),
                    }
                })?),
            };
        }
        staged.updated_at = Utc::now();

        let committed = self.commit(&mut state, ChangeKind::Corrected, staged)?;
        debug!(verification_id = %committed.id, "verification corrected");
        Ok(committed)
    }

    fn list_by_practice(&self, practice_id: &PracticeId) -> DentacallResult<Vec<Verification>> {
        let state = self.lock()?;
        if !state.practices.contains_key(practice_id) {
            return Err(DentacallError::PracticeNotFound {
                practice_id: practice_id.to_string(),
            });
        }
        let mut records: Vec<Verification> = state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.records.get(id))
            .filter(|v| &v.practice_id == practice_id)
            .cloned()
            .collect();
        // Stable: records created in the same instant keep newest-inserted first.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn delete(&self, id: VerificationId) -> DentacallResult<()> {
        let mut state = self.lock()?;
        let current = state.records.get(&id).ok_or_else(|| not_found(id))?;

        self.journal
            .append(&ChangeRecord::deleted(current))
            .map_err(as_persistence_failure)?;

        state.records.remove(&id);
        state.order.retain(|other| *other != id);
        info!(verification_id = %id, "verification deleted");
        Ok(())
    }
}
