//! # dentacall-store
//!
//! In-memory verification persistence for the dentacall engine.
//!
//! ## Overview
//!
//! `InMemoryVerificationStore` implements `VerificationStore`. Its terminal
//! update is conditional: a record leaves `in_progress` exactly once, however
//! many outcome events race for it. Every committed mutation is first
//! appended to a `ChangeJournal`; `InMemoryChangeJournal` links those entries
//! into a SHA-256 hash chain whose integrity can be re-verified at any time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dentacall_store::{InMemoryChangeJournal, InMemoryVerificationStore};
//!
//! let journal = InMemoryChangeJournal::new();
//! let store = InMemoryVerificationStore::with_journal(Arc::new(journal.clone()))
//!     .with_practice(Practice::named("practice-1", "Smile Dental"))?;
//! // ... hand `Box::new(store.clone())` to the service ...
//! assert!(journal.verify_integrity());
//! ```

pub mod chain;
pub mod journal;
pub mod memory;

pub use chain::{hash_change, verify_chain};
pub use journal::{InMemoryChangeJournal, JournalEntry};
pub use memory::InMemoryVerificationStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use dentacall_contracts::{
        call::{Attribution, CallDuration, CallTelemetry, IdentityFields},
        error::{DentacallError, DentacallResult},
        journal::{ChangeKind, ChangeRecord},
        practice::{ActorId, Practice, PracticeId},
        verification::{
            NewVerification, TerminalOutcome, TerminalUpdate, VerificationId, VerificationPatch,
            VerificationStatus,
        },
    };
    use dentacall_core::traits::{ChangeJournal, VerificationStore};

    use super::{InMemoryChangeJournal, InMemoryVerificationStore, JournalEntry};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Journal that rejects appends while `failing` is set.
    struct FlakyJournal {
        inner: InMemoryChangeJournal,
        failing: Arc<AtomicBool>,
    }

    impl ChangeJournal for FlakyJournal {
        fn append(&self, change: &ChangeRecord) -> DentacallResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(DentacallError::PersistenceFailed {
                    reason: "journal disk full".to_string(),
                });
            }
            self.inner.append(change)
        }
    }

    fn practice_id() -> PracticeId {
        PracticeId::new("practice-1")
    }

    fn store_with_journal() -> (InMemoryVerificationStore, InMemoryChangeJournal) {
        let journal = InMemoryChangeJournal::new();
        let store = InMemoryVerificationStore::with_journal(Arc::new(journal.clone()))
            .with_practice(Practice::named("practice-1", "Smile Dental"))
            .unwrap();
        (store, journal)
    }

    fn new_verification(patient: &str) -> NewVerification {
        NewVerification {
            practice_id: practice_id(),
            patient_name: patient.to_string(),
            patient_dob: "January 5, 1990".to_string(),
            member_id: "W123456789".to_string(),
            insurance_carrier: "Delta Dental".to_string(),
            phone_number: "+18005551234".to_string(),
            created_by_id: ActorId::new("staff-1"),
        }
    }

    fn completed_update() -> TerminalUpdate {
        TerminalUpdate {
            status: VerificationStatus::Completed,
            benefits: Some(r#"{"eligibility":{"eligible":true}}"#.to_string()),
            telemetry: CallTelemetry {
                call_id: Some("call-abc".to_string()),
                ended_reason: Some("customer-ended-call".to_string()),
                duration: Some(CallDuration { seconds: 104 }),
                recording_url: Some("https://recordings.example/abc.wav".to_string()),
                transcript: Some("AI: Hello".to_string()),
            },
            attribution: Attribution {
                reference_number: Some("REF-991".to_string()),
                rep_name: Some("Maria".to_string()),
            },
            identity: IdentityFields::default(),
        }
    }

    // ── 1. create / read ─────────────────────────────────────────────────────

    #[test]
    fn test_create_starts_in_progress() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();

        let record = store.get_by_id(id).unwrap();
        assert_eq!(record.status, VerificationStatus::InProgress);
        assert_eq!(record.patient_name, "Jane Doe");
        assert!(record.benefits.is_none());
        assert_eq!(record.created_at, record.updated_at);

        let history = journal.history(id);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, ChangeKind::Created);
    }

    #[test]
    fn test_create_rejects_unknown_practice() {
        let (store, journal) = store_with_journal();
        let mut new = new_verification("Jane Doe");
        new.practice_id = PracticeId::new("practice-404");

        assert!(matches!(
            store.create(new),
            Err(DentacallError::PracticeNotFound { .. })
        ));
        assert!(journal.is_empty());
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let (store, _) = store_with_journal();
        assert!(matches!(
            store.get_by_id(VerificationId::new()),
            Err(DentacallError::VerificationNotFound { .. })
        ));
    }

    #[test]
    fn test_list_is_newest_first_and_scoped_to_practice() {
        let (store, _) = store_with_journal();
        store.add_practice(Practice::named("practice-2", "Other Dental")).unwrap();

        let first = store.create(new_verification("First")).unwrap();
        let second = store.create(new_verification("Second")).unwrap();
        let mut elsewhere = new_verification("Elsewhere");
        elsewhere.practice_id = PracticeId::new("practice-2");
        store.create(elsewhere).unwrap();

        let ids: Vec<VerificationId> = store
            .list_by_practice(&practice_id())
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![second, first]);
    }

    // ── 2. terminal update ───────────────────────────────────────────────────

    #[test]
    fn test_terminal_update_applies_once() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();

        let outcome = store.update_terminal(id, completed_update()).unwrap();
        let record = match outcome {
            TerminalOutcome::Applied(record) => record,
            other => panic!("expected Applied, got {:?}", other),
        };
        assert_eq!(record.status, VerificationStatus::Completed);
        assert_eq!(record.call_id.as_deref(), Some("call-abc"));
        assert_eq!(record.call_duration.as_deref(), Some("1 min 44 sec"));
        assert_eq!(record.reference_number.as_deref(), Some("REF-991"));
        assert_eq!(record.rep_name.as_deref(), Some("Maria"));
        assert!(record.benefits.is_some());

        let mut second = TerminalUpdate::failed(CallTelemetry::default());
        second.telemetry.ended_reason = Some("silence-timed-out".to_string());
        assert_eq!(
            store.update_terminal(id, second).unwrap(),
            TerminalOutcome::AlreadyTerminal { status: VerificationStatus::Completed }
        );
        assert_eq!(store.get_by_id(id).unwrap(), record);
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn test_terminal_update_rejects_in_progress_status() {
        let (store, _) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        let mut update = completed_update();
        update.status = VerificationStatus::InProgress;

        assert!(matches!(
            store.update_terminal(id, update),
            Err(DentacallError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_terminal_identity_only_fills_blank_fields() {
        let (store, _) = store_with_journal();
        let mut new = new_verification("Jane Doe");
        new.member_id = String::new();
        let id = store.create(new).unwrap();

        let mut update = completed_update();
        update.identity = IdentityFields {
            patient_name: Some("JANE D".to_string()),
            patient_dob: None,
            member_id: Some("W999".to_string()),
            insurance_carrier: Some("Aetna".to_string()),
        };
        store.update_terminal(id, update).unwrap();

        let record = store.get_by_id(id).unwrap();
        assert_eq!(record.patient_name, "Jane Doe");
        assert_eq!(record.member_id, "W999");
        assert_eq!(record.insurance_carrier, "Delta Dental");
    }

    #[test]
    fn test_existing_call_id_is_kept() {
        let (store, _) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        store.update(id, VerificationPatch::call_id("call-original")).unwrap();

        store.update_terminal(id, completed_update()).unwrap();
        assert_eq!(store.get_by_id(id).unwrap().call_id.as_deref(), Some("call-original"));
        assert_eq!(
            store.find_by_call_id("call-original").unwrap().map(|v| v.id),
            Some(id)
        );
        assert!(store.find_by_call_id("call-abc").unwrap().is_none());
    }

    #[test]
    fn test_concurrent_terminal_updates_apply_exactly_once() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();

        let outcomes: Vec<TerminalOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = &store;
                    scope.spawn(move || {
                        let update = if i % 2 == 0 {
                            completed_update()
                        } else {
                            TerminalUpdate::failed(CallTelemetry::default())
                        };
                        store.update_terminal(id, update).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let applied: Vec<&TerminalOutcome> = outcomes
            .iter()
            .filter(|o| matches!(o, TerminalOutcome::Applied(_)))
            .collect();
        assert_eq!(applied.len(), 1, "exactly one event may apply");

        let final_status = store.get_by_id(id).unwrap().status;
        for outcome in &outcomes {
            if let TerminalOutcome::AlreadyTerminal { status } = outcome {
                assert_eq!(*status, final_status);
            }
        }
        assert_eq!(journal.len(), 2);
        assert!(journal.verify_integrity());
    }

    // ── 3. atomic writes ─────────────────────────────────────────────────────

    #[test]
    fn test_journal_failure_leaves_record_unchanged() {
        let failing = Arc::new(AtomicBool::new(false));
        let journal = FlakyJournal {
            inner: InMemoryChangeJournal::new(),
            failing: Arc::clone(&failing),
        };
        let store = InMemoryVerificationStore::with_journal(Arc::new(journal))
            .with_practice(Practice::named("practice-1", "Smile Dental"))
            .unwrap();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        let before = store.get_by_id(id).unwrap();

        failing.store(true, Ordering::SeqCst);
        assert!(matches!(
            store.update_terminal(id, completed_update()),
            Err(DentacallError::PersistenceFailed { .. })
        ));
        assert_eq!(store.get_by_id(id).unwrap(), before);

        assert!(matches!(
            store.delete(id),
            Err(DentacallError::PersistenceFailed { .. })
        ));
        assert!(store.get_by_id(id).is_ok());

        failing.store(false, Ordering::SeqCst);
        assert!(matches!(
            store.update_terminal(id, completed_update()).unwrap(),
            TerminalOutcome::Applied(_)
        ));
    }

    #[test]
    fn test_failed_create_is_not_visible() {
        let failing = Arc::new(AtomicBool::new(true));
        let store = InMemoryVerificationStore::with_journal(Arc::new(FlakyJournal {
            inner: InMemoryChangeJournal::new(),
            failing,
        }))
        .with_practice(Practice::named("practice-1", "Smile Dental"))
        .unwrap();

        assert!(store.create(new_verification("Jane Doe")).is_err());
        assert!(store.list_by_practice(&practice_id()).unwrap().is_empty());
    }

    // ── 4. operator corrections ──────────────────────────────────────────────

    #[test]
    fn test_patch_updates_fields_and_serializes_benefits() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        store.update_terminal(id, completed_update()).unwrap();

        let patch = VerificationPatch {
            patient_name: Some("Jane Q. Doe".to_string()),
            rep_name: Some("Maria S.".to_string()),
            benefits: Some(json!({ "coverage": { "basic": 80 } })),
            ..VerificationPatch::default()
        };
        let record = store.update(id, patch).unwrap();

        assert_eq!(record.patient_name, "Jane Q. Doe");
        assert_eq!(record.rep_name.as_deref(), Some("Maria S."));
        assert_eq!(record.benefits.as_deref(), Some(r#"{"coverage":{"basic":80}}"#));
        assert_eq!(record.reference_number.as_deref(), Some("REF-991"));
        assert_eq!(journal.history(id).last().map(|c| c.kind), Some(ChangeKind::Corrected));
    }

    #[test]
    fn test_patch_status_rules() {
        let (store, _) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();

        let to_failed = VerificationPatch {
            status: Some(VerificationStatus::Failed),
            ..VerificationPatch::default()
        };
        assert!(matches!(
            store.update(id, to_failed.clone()),
            Err(DentacallError::InvalidTransition { .. })
        ));

        store.update_terminal(id, completed_update()).unwrap();
        assert_eq!(store.update(id, to_failed).unwrap().status, VerificationStatus::Failed);

        let reopen = VerificationPatch {
            status: Some(VerificationStatus::InProgress),
            ..VerificationPatch::default()
        };
        assert!(matches!(
            store.update(id, reopen),
            Err(DentacallError::InvalidTransition { .. })
        ));
        assert_eq!(store.get_by_id(id).unwrap().status, VerificationStatus::Failed);
    }

    #[test]
    fn test_benefits_patch_waits_for_call_outcome() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();

        let early = VerificationPatch {
            benefits: Some(json!({ "maximums": { "annual": 1500 } })),
            ..VerificationPatch::default()
        };
        assert!(matches!(
            store.update(id, early.clone()),
            Err(DentacallError::InvalidTransition { .. })
        ));
        let stored = store.get_by_id(id).unwrap();
        assert_eq!(stored.status, VerificationStatus::InProgress);
        assert!(stored.benefits.is_none());
        assert_eq!(journal.len(), 1);

        store.update_terminal(id, completed_update()).unwrap();
        let corrected = store.update(id, early).unwrap();
        assert_eq!(corrected.benefits.as_deref(), Some(r#"{"maximums":{"annual":1500}}"#));
    }

    #[test]
    fn test_null_benefits_patch_clears_benefits() {
        let (store, _) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        store.update_terminal(id, completed_update()).unwrap();

        let clear = VerificationPatch {
            benefits: Some(serde_json::Value::Null),
            ..VerificationPatch::default()
        };
        assert!(store.update(id, clear).unwrap().benefits.is_none());
    }

    #[test]
    fn test_empty_patch_is_not_journaled() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        store.update(id, VerificationPatch::default()).unwrap();
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn test_delete_removes_and_journals() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        store.delete(id).unwrap();

        assert!(store.get_by_id(id).is_err());
        assert!(store.list_by_practice(&practice_id()).unwrap().is_empty());
        let last = journal.entries().pop().unwrap();
        assert_eq!(last.change.kind, ChangeKind::Deleted);
        assert!(last.change.snapshot.is_none());
        assert!(matches!(
            store.delete(id),
            Err(DentacallError::VerificationNotFound { .. })
        ));
    }

    // ── 5. hash chain ────────────────────────────────────────────────────────

    #[test]
    fn test_chain_links_from_genesis() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        store.update_terminal(id, completed_update()).unwrap();

        let entries = journal.entries();
        assert_eq!(entries[0].prev_hash, JournalEntry::GENESIS_HASH);
        assert_eq!(entries[1].prev_hash, entries[0].this_hash);
        assert_eq!(journal.head_hash().as_deref(), Some(entries[1].this_hash.as_str()));
        for (idx, entry) in entries.iter().enumerate() {
            assert_eq!(entry.sequence, idx as u64);
            assert_eq!(entry.this_hash.len(), 64);
        }
        assert!(journal.verify_integrity());
    }

    #[test]
    fn test_tampering_breaks_the_chain() {
        let (store, journal) = store_with_journal();
        let id = store.create(new_verification("Jane Doe")).unwrap();
        store.update_terminal(id, completed_update()).unwrap();

        {
            let mut state = journal.state.lock().unwrap();
            state.entries[0].change.status = VerificationStatus::Failed;
        }
        assert!(!journal.verify_integrity());
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(InMemoryChangeJournal::new().verify_integrity());
        assert!(super::verify_chain(&[]));
    }
}
