//! Hash-chain primitives for the change journal.
//!
//! Hash input layout (bytes, in order):
//!   1. sequence as 8-byte little-endian
//!   2. verification id as its hyphenated UTF-8 form
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the change record

use sha2::{Digest, Sha256};

use dentacall_contracts::{
    error::{DentacallError, DentacallResult},
    journal::ChangeRecord,
};

use crate::journal::JournalEntry;

/// Compute the SHA-256 hash of one journal entry. Lowercase hex.
pub fn hash_change(sequence: u64, change: &ChangeRecord, prev_hash: &str) -> DentacallResult<String> {
    let change_json = serde_json::to_vec(change).map_err(|e| DentacallError::Serialization {
        reason: format!("change record for {}: {}", change.verification_id, e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(sequence.to_le_bytes());
    hasher.update(change.verification_id.to_string().as_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&change_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Check prev-hash linkage and recompute every entry's hash.
///
/// An empty chain is valid. Sequences must run 0, 1, 2, … without gaps.
pub fn verify_chain(entries: &[JournalEntry]) -> bool {
    let mut expected_prev: &str = JournalEntry::GENESIS_HASH;

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_hash != expected_prev {
            return false;
        }
        match hash_change(entry.sequence, &entry.change, &entry.prev_hash) {
            Ok(recomputed) if recomputed == entry.this_hash => {}
            _ => return false,
        }
        expected_prev = entry.this_hash.as_str();
    }

    true
}
