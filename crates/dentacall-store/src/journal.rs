//! In-memory, hash-chained implementation of `ChangeJournal`.
//!
//! Every committed store mutation is wrapped in a `JournalEntry` linked to
//! the previous entry by its SHA-256 hash. Editing any entry after the fact
//! breaks the chain, which `verify_integrity` detects.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::debug;

use dentacall_contracts::{
    error::{DentacallError, DentacallResult},
    journal::ChangeRecord,
    verification::VerificationId,
};
use dentacall_core::traits::ChangeJournal;

use crate::chain::{hash_change, verify_chain};

/// One link in the journal's hash chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,
    pub change: ChangeRecord,
    /// Hash of the previous entry, or `GENESIS_HASH` for the first one.
    pub prev_hash: String,
    pub this_hash: String,
}

impl JournalEntry {
    /// The `prev_hash` of the first entry: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

pub(crate) struct JournalState {
    pub(crate) entries: Vec<JournalEntry>,
    pub(crate) last_hash: String,
}

/// Append-only change journal kept in memory.
///
/// Clones share the same chain, so a caller can keep a handle for inspection
/// while the store owns another.
#[derive(Clone)]
pub struct InMemoryChangeJournal {
    pub(crate) state: Arc<Mutex<JournalState>>,
}

impl InMemoryChangeJournal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(JournalState {
                entries: Vec::new(),
                last_hash: JournalEntry::GENESIS_HASH.to_string(),
            })),
        }
    }

    /// Every entry, in append order. Empty if the lock is poisoned.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.state
            .lock()
            .map(|s| s.entries.clone())
            .unwrap_or_default()
    }

    /// The changes recorded for one verification, oldest first.
    pub fn history(&self, id: VerificationId) -> Vec<ChangeRecord> {
        self.entries()
            .into_iter()
            .filter(|e| e.change.verification_id == id)
            .map(|e| e.change)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The hash of the newest entry, a compact commitment to the whole chain.
    pub fn head_hash(&self) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.entries.last().map(|e| e.this_hash.clone()))
    }

    /// Verify that no entry has been altered since it was appended.
    pub fn verify_integrity(&self) -> bool {
        match self.state.lock() {
            Ok(state) => verify_chain(&state.entries),
            Err(_) => false,
        }
    }
}

impl Default for InMemoryChangeJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeJournal for InMemoryChangeJournal {
    fn append(&self, change: &ChangeRecord) -> DentacallResult<()> {
        let mut state = self.state.lock().map_err(|e| DentacallError::PersistenceFailed {
            reason: format!("journal lock poisoned: {}", e),
        })?;

        let sequence = state.entries.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_change(sequence, change, &prev_hash)?;

        debug!(
            sequence,
            verification_id = %change.verification_id,
            kind = ?change.kind,
            "change journaled"
        );

        state.entries.push(JournalEntry {
            sequence,
            change: change.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;
        Ok(())
    }
}
