//! The verification service: intake, call placement, and call-outcome
//! reconciliation.
//!
//! The terminal path runs in a fixed order:
//!
//!   Extract → Gate on event type → Correlate → Normalize → Classify → Conditional update
//!
//! Nothing before the conditional update writes state, so a duplicate or late
//! event costs one extraction and is then dropped by the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use dentacall_contracts::{
    call::{CallPlacement, CallRequest, CallTelemetry, ExtractedCall},
    error::{DentacallError, DentacallResult},
    practice::{ActorId, PracticeId},
    verification::{
        NewVerification, TerminalOutcome, TerminalUpdate, Verification, VerificationId,
        VerificationPatch, VerificationStatus,
    },
};

use crate::intake::prepare_call;
use crate::traits::{
    BenefitsNormalizer, CallTrigger, PayloadExtractor, StatusClassifier, VerificationStore,
};

/// What the service did with an inbound call event.
///
/// Every variant is a successful acknowledgement; the webhook caller should
/// never retry on any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum EventAck {
    /// Not a terminal event type; no state was touched.
    Ignored { event_type: Option<String> },
    /// The terminal transition was applied.
    Applied { verification_id: VerificationId, status: VerificationStatus },
    /// The verification had already left `in_progress`.
    AlreadyTerminal { verification_id: VerificationId, status: VerificationStatus },
    /// No verification matches this call.
    Unmatched { call_id: Option<String> },
}

/// Wires the pipeline components together.
///
/// One service instance handles every practice; it holds no per-request
/// state and may be shared across threads.
pub struct VerificationService {
    extractor: Box<dyn PayloadExtractor>,
    normalizer: Box<dyn BenefitsNormalizer>,
    classifier: Box<dyn StatusClassifier>,
    store: Box<dyn VerificationStore>,
    trigger: Box<dyn CallTrigger>,
}

impl VerificationService {
    pub fn new(
        extractor: Box<dyn PayloadExtractor>,
        normalizer: Box<dyn BenefitsNormalizer>,
        classifier: Box<dyn StatusClassifier>,
        store: Box<dyn VerificationStore>,
        trigger: Box<dyn CallTrigger>,
    ) -> Self {
        Self { extractor, normalizer, classifier, store, trigger }
    }

    // ── Intake ───────────────────────────────────────────────────────────────

    /// Validate a request, create the `in_progress` record, and place the call.
    ///
    /// # Errors
    ///
    /// Intake errors (`MissingField`, `InvalidPhoneNumber`, `InvalidDate`) and
    /// `PracticeNotFound` are returned before anything is stored. If the call
    /// cannot be placed, the record is moved to `failed` and
    /// `CallTriggerFailed` is returned; if that write fails too, the error is
    /// `PersistenceFailed` and the record is left `in_progress`.
    pub fn start_call(
        &self,
        practice_id: &PracticeId,
        request: &CallRequest,
        actor: &ActorId,
    ) -> DentacallResult<VerificationId> {
        let prepared = prepare_call(request)?;
        let practice = self.store.get_practice(practice_id)?;

        let id = self.store.create(NewVerification {
            practice_id: practice_id.clone(),
            patient_name: prepared.patient.name.clone(),
            patient_dob: prepared.patient.spoken_dob.clone(),
            member_id: prepared.patient.member_id.clone(),
            insurance_carrier: prepared.insurance_carrier.clone(),
            phone_number: prepared.phone_number.clone(),
            created_by_id: actor.clone(),
        })?;

        debug!(
            verification_id = %id,
            practice_id = %practice_id,
            "verification created, placing call"
        );

        let placement = CallPlacement {
            verification_id: id,
            practice_id: practice_id.clone(),
            practice,
            phone_number: prepared.phone_number,
            patient: prepared.patient,
            subscriber: prepared.subscriber,
        };

        match self.trigger.place_call(&placement) {
            Ok(reference) => {
                self.store.update(id, VerificationPatch::call_id(reference.call_id.clone()))?;
                info!(
                    verification_id = %id,
                    call_id = %reference.call_id,
                    "verification call placed"
                );
                Ok(id)
            }
            Err(err) => {
                warn!(verification_id = %id, error = %err, "call trigger failed");
                let reason = match err {
                    DentacallError::CallTriggerFailed { reason } => reason,
                    other => other.to_string(),
                };
                if let Err(store_err) =
                    self.store.update_terminal(id, TerminalUpdate::failed(CallTelemetry::default()))
                {
                    warn!(
                        verification_id = %id,
                        error = %store_err,
                        "could not mark verification failed after trigger error"
                    );
                    return Err(DentacallError::PersistenceFailed {
                        reason: format!(
                            "call trigger failed ({}) and verification {} could not be marked failed: {}",
                            reason, id, store_err
                        ),
                    });
                }
                Err(DentacallError::CallTriggerFailed { reason })
            }
        }
    }

    // ── Call outcome ─────────────────────────────────────────────────────────

    /// Process one inbound call event.
    ///
    /// Non-terminal events, unmatched calls, and duplicate deliveries are all
    /// acknowledged without error. Only store failures surface as `Err`.
    pub fn handle_call_event(&self, payload: &Value) -> DentacallResult<EventAck> {
        let extracted = self.extractor.extract(payload);

        let is_terminal = extracted
            .event_type
            .as_deref()
            .map(|t| self.classifier.is_terminal_event(t))
            .unwrap_or(false);

        if !is_terminal {
            debug!(event_type = ?extracted.event_type, "non-terminal call event acknowledged");
            return Ok(EventAck::Ignored { event_type: extracted.event_type });
        }

        let Some(target) = self.correlate(&extracted)? else {
            warn!(
                call_id = ?extracted.telemetry.call_id,
                correlation_id = ?extracted.correlation_id,
                "terminal call event matches no verification"
            );
            return Ok(EventAck::Unmatched { call_id: extracted.telemetry.call_id });
        };

        if target.status.is_terminal() {
            warn!(
                verification_id = %target.id,
                status = %target.status,
                "duplicate terminal event ignored"
            );
            return Ok(EventAck::AlreadyTerminal {
                verification_id: target.id,
                status: target.status,
            });
        }

        let update = self.reconcile(&target, extracted);
        self.apply_terminal(target.id, update)
    }

    /// Find the verification an event belongs to: the verification id the
    /// call was placed with, then the external call id.
    fn correlate(&self, extracted: &ExtractedCall) -> DentacallResult<Option<Verification>> {
        if let Some(id) = extracted.correlation_id.as_deref().and_then(VerificationId::parse) {
            match self.store.get_by_id(id) {
                Ok(found) => return Ok(Some(found)),
                Err(DentacallError::VerificationNotFound { .. }) => {
                    debug!(verification_id = %id, "correlation id not found, trying call id");
                }
                Err(e) => return Err(e),
            }
        }

        match extracted.telemetry.call_id.as_deref() {
            Some(call_id) => self.store.find_by_call_id(call_id),
            None => Ok(None),
        }
    }

    /// Normalize and classify, producing the terminal update.
    ///
    /// If the canonical document cannot be serialized, the call is recorded
    /// as `failed` with whatever telemetry was extracted.
    fn reconcile(&self, target: &Verification, extracted: ExtractedCall) -> TerminalUpdate {
        let benefits = self.normalizer.normalize(&extracted.fields);
        let status = self.classifier.classify(&benefits, &extracted.telemetry);

        debug!(
            verification_id = %target.id,
            captured_categories = benefits.as_map().len(),
            status = %status,
            "call outcome classified"
        );

        let serialized = if benefits.is_empty() {
            None
        } else {
            match benefits.to_json_string() {
                Ok(json) => Some(json),
                Err(e) => {
                    warn!(
                        verification_id = %target.id,
                        error = %e,
                        "benefits document could not be serialized, salvaging telemetry"
                    );
                    return TerminalUpdate::failed(extracted.telemetry);
                }
            }
        };

        TerminalUpdate {
            status,
            benefits: serialized,
            telemetry: extracted.telemetry,
            attribution: extracted.attribution,
            identity: extracted.identity,
        }
    }

    fn apply_terminal(&self, id: VerificationId, update: TerminalUpdate) -> DentacallResult<EventAck> {
        match self.store.update_terminal(id, update)? {
            TerminalOutcome::Applied(verification) => {
                info!(
                    verification_id = %id,
                    status = %verification.status,
                    call_duration = ?verification.call_duration,
                    "verification reached terminal status"
                );
                Ok(EventAck::Applied { verification_id: id, status: verification.status })
            }
            TerminalOutcome::AlreadyTerminal { status } => {
                warn!(
                    verification_id = %id,
                    status = %status,
                    "terminal event lost the race to another delivery"
                );
                Ok(EventAck::AlreadyTerminal { verification_id: id, status })
            }
        }
    }

    // ── Operator access ──────────────────────────────────────────────────────

    /// Apply an operator correction.
    ///
    /// A supplied benefits document of any generation is normalized to the
    /// canonical shape before it is stored. `null`, or a document with no
    /// recognized field, clears the stored benefits.
    pub fn correct(
        &self,
        id: VerificationId,
        mut patch: VerificationPatch,
    ) -> DentacallResult<Verification> {
        if let Some(document) = patch.benefits.take() {
            let normalized = self.normalizer.normalize_document(&document);
            patch.benefits = Some(if normalized.is_empty() {
                Value::Null
            } else {
                normalized.into_value()
            });
        }
        let updated = self.store.update(id, patch)?;
        info!(verification_id = %id, status = %updated.status, "verification corrected");
        Ok(updated)
    }

    pub fn get(&self, id: VerificationId) -> DentacallResult<Verification> {
        self.store.get_by_id(id)
    }

    /// All verifications of a practice, newest first.
    pub fn list(&self, practice_id: &PracticeId) -> DentacallResult<Vec<Verification>> {
        self.store.list_by_practice(practice_id)
    }

    pub fn delete(&self, id: VerificationId) -> DentacallResult<()> {
        self.store.delete(id)?;
        info!(verification_id = %id, "verification deleted");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use serde_json::{json, Map};

    use dentacall_contracts::{
        benefits::BenefitsDocument,
        call::{CallReference, IdentityFields},
        practice::Practice,
    };

    use super::*;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// Reads `message.type`, `call.id`, `call.metadata.verificationId`, and
    /// the flat `message.fields` object.
    struct MockExtractor;

    impl PayloadExtractor for MockExtractor {
        fn extract(&self, payload: &Value) -> ExtractedCall {
            let message = &payload["message"];
            ExtractedCall {
                event_type: message["type"].as_str().map(str::to_string),
                fields: message["fields"].as_object().cloned().unwrap_or_default(),
                identity: IdentityFields {
                    patient_name: message["fields"]["patient_name"].as_str().map(str::to_string),
                    ..IdentityFields::default()
                },
                telemetry: CallTelemetry {
                    call_id: message["call"]["id"].as_str().map(str::to_string),
                    ..CallTelemetry::default()
                },
                correlation_id: message["call"]["metadata"]["verificationId"]
                    .as_str()
                    .map(str::to_string),
                ..ExtractedCall::default()
            }
        }
    }

    /// Copies every field to the top level of the document.
    struct MockNormalizer;

    impl BenefitsNormalizer for MockNormalizer {
        fn normalize(&self, fields: &Map<String, Value>) -> BenefitsDocument {
            BenefitsDocument::from_map(fields.clone())
        }
    }

    /// `completed` when the document is non-empty, `failed` otherwise.
    struct MockClassifier;

    impl StatusClassifier for MockClassifier {
        fn is_terminal_event(&self, event_type: &str) -> bool {
            event_type == "end-of-call-report"
        }

        fn classify(&self, benefits: &BenefitsDocument, _: &CallTelemetry) -> VerificationStatus {
            if benefits.is_empty() {
                VerificationStatus::Failed
            } else {
                VerificationStatus::Completed
            }
        }
    }

    #[derive(Default)]
    struct MockStoreState {
        records: HashMap<VerificationId, Verification>,
        terminal_calls: u32,
        fail_terminal: bool,
    }

    #[derive(Clone, Default)]
    struct MockStore {
        state: Arc<Mutex<MockStoreState>>,
    }

    impl VerificationStore for MockStore {
        fn get_practice(&self, practice_id: &PracticeId) -> DentacallResult<Practice> {
            if practice_id.0 == "practice-1" {
                Ok(Practice::named("practice-1", "Smile Dental"))
            } else {
                Err(DentacallError::PracticeNotFound { practice_id: practice_id.0.clone() })
            }
        }

        fn create(&self, new: NewVerification) -> DentacallResult<VerificationId> {
            let now = Utc::now();
            let v = Verification {
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
            let id = v.id;
            self.state.lock().unwrap().records.insert(id, v);
            Ok(id)
        }

        fn get_by_id(&self, id: VerificationId) -> DentacallResult<Verification> {
            self.state
                .lock()
                .unwrap()
                .records
                .get(&id)
                .cloned()
                .ok_or(DentacallError::VerificationNotFound { id: id.to_string() })
        }

        fn find_by_call_id(&self, call_id: &str) -> DentacallResult<Option<Verification>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .records
                .values()
                .find(|v| v.call_id.as_deref() == Some(call_id))
                .cloned())
        }

        fn update_terminal(
            &self,
            id: VerificationId,
            update: TerminalUpdate,
        ) -> DentacallResult<TerminalOutcome> {
            let mut state = self.state.lock().unwrap();
            state.terminal_calls += 1;
            if state.fail_terminal {
                return Err(DentacallError::PersistenceFailed {
                    reason: "journal unavailable".to_string(),
                });
            }
            let v = state
                .records
                .get_mut(&id)
                .ok_or(DentacallError::VerificationNotFound { id: id.to_string() })?;
            if v.status.is_terminal() {
                return Ok(TerminalOutcome::AlreadyTerminal { status: v.status });
            }
            v.status = update.status;
            v.benefits = update.benefits;
            Ok(TerminalOutcome::Applied(v.clone()))
        }

        fn update(
            &self,
            id: VerificationId,
            patch: VerificationPatch,
        ) -> DentacallResult<Verification> {
            let mut state = self.state.lock().unwrap();
            let v = state
                .records
                .get_mut(&id)
                .ok_or(DentacallError::VerificationNotFound { id: id.to_string() })?;
            if let Some(call_id) = patch.call_id {
                v.call_id = Some(call_id);
            }
            if let Some(benefits) = patch.benefits {
                if !v.status.is_terminal() {
                    return Err(DentacallError::InvalidTransition {
                        id: id.to_string(),
                        reason: "in_progress".to_string(),
                    });
                }
                v.benefits = match benefits {
                    Value::Null => None,
                    other => Some(other.to_string()),
                };
            }
            Ok(v.clone())
        }

        fn list_by_practice(&self, practice_id: &PracticeId) -> DentacallResult<Vec<Verification>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .records
                .values()
                .filter(|v| &v.practice_id == practice_id)
                .cloned()
                .collect())
        }

        fn delete(&self, id: VerificationId) -> DentacallResult<()> {
            self.state.lock().unwrap().records.remove(&id);
            Ok(())
        }
    }

    /// A trigger that records placements and either succeeds or fails.
    #[derive(Clone)]
    struct MockTrigger {
        placements: Arc<Mutex<Vec<CallPlacement>>>,
        fail: bool,
    }

    impl MockTrigger {
        fn new(fail: bool) -> Self {
            Self { placements: Arc::new(Mutex::new(vec![])), fail }
        }
    }

    impl CallTrigger for MockTrigger {
        fn place_call(&self, placement: &CallPlacement) -> DentacallResult<CallReference> {
            self.placements.lock().unwrap().push(placement.clone());
            if self.fail {
                Err(DentacallError::CallTriggerFailed { reason: "HTTP 503".to_string() })
            } else {
                Ok(CallReference { call_id: format!("call-{}", placement.verification_id) })
            }
        }
    }

    fn make_service(store: MockStore, trigger: MockTrigger) -> VerificationService {
        VerificationService::new(
            Box::new(MockExtractor),
            Box::new(MockNormalizer),
            Box::new(MockClassifier),
            Box::new(store),
            Box::new(trigger),
        )
    }

    fn make_request() -> CallRequest {
        CallRequest {
            patient_name: Some("Sarah Johnson".to_string()),
            patient_dob: Some("1985-03-15".to_string()),
            member_id: Some("DSM987654321".to_string()),
            insurance_carrier: Some("Delta Dental".to_string()),
            phone_number: Some("800-555-1234".to_string()),
            subscriber_name: None,
            subscriber_dob: None,
        }
    }

    fn practice() -> PracticeId {
        PracticeId::new("practice-1")
    }

    fn actor() -> ActorId {
        ActorId::new("staff-1")
    }

    fn end_of_call(id: VerificationId) -> Value {
        json!({
            "message": {
                "type": "end-of-call-report",
                "call": { "id": "call-x", "metadata": { "verificationId": id.to_string() } },
                "fields": { "patient_eligible": true }
            }
        })
    }

    // ── Intake ───────────────────────────────────────────────────────────────

    #[test]
    fn test_start_call_records_call_reference() {
        let store = MockStore::default();
        let trigger = MockTrigger::new(false);
        let service = make_service(store.clone(), trigger.clone());

        let id = service.start_call(&practice(), &make_request(), &actor()).unwrap();

        let stored = store.get_by_id(id).unwrap();
        assert_eq!(stored.status, VerificationStatus::InProgress);
        assert_eq!(stored.call_id, Some(format!("call-{id}")));
        assert_eq!(stored.patient_dob, "March 15, 1985");
        assert_eq!(stored.phone_number, "+18005551234");

        let placements = trigger.placements.lock().unwrap();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].verification_id, id);
        assert_eq!(placements[0].practice.name, "Smile Dental");
    }

    #[test]
    fn test_start_call_rejects_unknown_practice_before_storing() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));

        let result = service.start_call(&PracticeId::new("nope"), &make_request(), &actor());

        assert!(matches!(result, Err(DentacallError::PracticeNotFound { .. })));
        assert!(store.state.lock().unwrap().records.is_empty());
    }

    #[test]
    fn test_trigger_failure_marks_record_failed() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(true));

        let result = service.start_call(&practice(), &make_request(), &actor());

        match result {
            Err(DentacallError::CallTriggerFailed { reason }) => assert!(reason.contains("503")),
            other => panic!("expected CallTriggerFailed, got {other:?}"),
        }
        let records: Vec<Verification> = store.list_by_practice(&practice()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, VerificationStatus::Failed);
        assert_eq!(records[0].benefits, None);
    }

    // ── Call outcome ─────────────────────────────────────────────────────────

    #[test]
    fn test_non_terminal_event_is_ignored() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));

        let ack = service
            .handle_call_event(&json!({ "message": { "type": "status-update" } }))
            .unwrap();

        assert_eq!(ack, EventAck::Ignored { event_type: Some("status-update".to_string()) });
        assert_eq!(store.state.lock().unwrap().terminal_calls, 0);
    }

    #[test]
    fn test_payload_without_event_type_is_ignored() {
        let service = make_service(MockStore::default(), MockTrigger::new(false));
        let ack = service.handle_call_event(&json!("garbage")).unwrap();
        assert_eq!(ack, EventAck::Ignored { event_type: None });
    }

    #[test]
    fn test_terminal_event_applies_once() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));
        let id = service.start_call(&practice(), &make_request(), &actor()).unwrap();

        let first = service.handle_call_event(&end_of_call(id)).unwrap();
        let second = service.handle_call_event(&end_of_call(id)).unwrap();

        assert_eq!(
            first,
            EventAck::Applied { verification_id: id, status: VerificationStatus::Completed }
        );
        assert_eq!(
            second,
            EventAck::AlreadyTerminal { verification_id: id, status: VerificationStatus::Completed }
        );
        assert_eq!(store.state.lock().unwrap().terminal_calls, 1);
    }

    #[test]
    fn test_correlates_by_call_id_when_metadata_missing() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));
        let id = service.start_call(&practice(), &make_request(), &actor()).unwrap();

        let payload = json!({
            "message": {
                "type": "end-of-call-report",
                "call": { "id": format!("call-{id}") },
                "fields": {}
            }
        });
        let ack = service.handle_call_event(&payload).unwrap();

        assert_eq!(
            ack,
            EventAck::Applied { verification_id: id, status: VerificationStatus::Failed }
        );
        assert_eq!(store.get_by_id(id).unwrap().benefits, None);
    }

    #[test]
    fn test_unmatched_event_creates_nothing() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));

        let payload = json!({
            "message": {
                "type": "end-of-call-report",
                "call": { "id": "call-unknown", "metadata": { "verificationId": "not-a-uuid" } }
            }
        });
        let ack = service.handle_call_event(&payload).unwrap();

        assert_eq!(ack, EventAck::Unmatched { call_id: Some("call-unknown".to_string()) });
        assert!(store.state.lock().unwrap().records.is_empty());
    }

    // ── Operator access ──────────────────────────────────────────────────────

    #[test]
    fn test_correct_normalizes_supplied_benefits() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));
        let id = service.start_call(&practice(), &make_request(), &actor()).unwrap();
        service.handle_call_event(&end_of_call(id)).unwrap();

        let patch = VerificationPatch {
            benefits: Some(json!({ "notes": "called back" })),
            ..VerificationPatch::default()
        };
        let updated = service.correct(id, patch).unwrap();

        assert_eq!(updated.status, VerificationStatus::Completed);
        assert_eq!(updated.benefits.as_deref(), Some(r#"{"notes":"called back"}"#));
    }

    #[test]
    fn test_correct_rejects_benefits_before_call_outcome() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));
        let id = service.start_call(&practice(), &make_request(), &actor()).unwrap();

        let patch = VerificationPatch {
            benefits: Some(json!({ "annualMaximum": 1500 })),
            ..VerificationPatch::default()
        };
        assert!(matches!(
            service.correct(id, patch),
            Err(DentacallError::InvalidTransition { .. })
        ));
        let stored = store.get_by_id(id).unwrap();
        assert_eq!(stored.status, VerificationStatus::InProgress);
        assert!(stored.benefits.is_none());
    }

    #[test]
    fn test_correct_with_null_or_unrecognized_document_clears_benefits() {
        let store = MockStore::default();
        let service = make_service(store.clone(), MockTrigger::new(false));
        let id = service.start_call(&practice(), &make_request(), &actor()).unwrap();
        service.handle_call_event(&end_of_call(id)).unwrap();
        assert!(store.get_by_id(id).unwrap().benefits.is_some());

        for document in [Value::Null, json!("not a document"), json!({})] {
            let patch = VerificationPatch {
                benefits: Some(document),
                ..VerificationPatch::default()
            };
            assert_eq!(service.correct(id, patch).unwrap().benefits, None);
        }
    }

    #[test]
    fn test_trigger_failure_surfaces_store_failure() {
        let store = MockStore::default();
        store.state.lock().unwrap().fail_terminal = true;
        let service = make_service(store.clone(), MockTrigger::new(true));

        match service.start_call(&practice(), &make_request(), &actor()) {
            Err(DentacallError::PersistenceFailed { reason }) => {
                assert!(reason.contains("HTTP 503"));
                assert!(reason.contains("journal unavailable"));
            }
            other => panic!("expected PersistenceFailed, got {other:?}"),
        }
        let records = store.list_by_practice(&practice()).unwrap();
        assert_eq!(records[0].status, VerificationStatus::InProgress);
    }
}
