//! Wiring of the real engine components around in-memory collaborators.

use std::sync::Arc;

use dentacall_contracts::{
    call::CallRequest,
    error::DentacallResult,
    practice::{ActorId, Practice, PracticeId},
};
use dentacall_core::VerificationService;
use dentacall_extract::CallPayloadExtractor;
use dentacall_normalize::DictionaryNormalizer;
use dentacall_policy::TomlStatusClassifier;
use dentacall_store::{InMemoryChangeJournal, InMemoryVerificationStore};

use crate::mock_trigger::MockCallTrigger;

pub const PRACTICE_ID: &str = "practice-bright-smiles";

/// The practice every scenario runs as.
pub fn demo_practice() -> Practice {
    Practice {
        address: Some("120 Main Street".to_string()),
        city: Some("Springfield".to_string()),
        state: Some("IL".to_string()),
        zip: Some("62701".to_string()),
        phone: Some("+12175550100".to_string()),
        npi_practice: Some("1234567893".to_string()),
        tax_id: Some("12-3456789".to_string()),
        dentist_name: Some("Dr. Alicia Moreno".to_string()),
        ..Practice::named(PRACTICE_ID, "Bright Smiles Dental")
    }
}

/// The request front-desk staff submit for the demo patient.
pub fn demo_request() -> CallRequest {
    CallRequest {
        patient_name: Some("Jane Doe".to_string()),
        patient_dob: Some("1990-01-05".to_string()),
        member_id: Some("W123456789".to_string()),
        insurance_carrier: Some("Delta Dental".to_string()),
        phone_number: Some("(800) 555-0199".to_string()),
        subscriber_name: None,
        subscriber_dob: None,
    }
}

/// A service plus inspectable handles on the collaborators it owns.
pub struct DentalRuntime {
    pub service: VerificationService,
    pub store: InMemoryVerificationStore,
    pub journal: InMemoryChangeJournal,
    pub trigger: MockCallTrigger,
    pub practice_id: PracticeId,
    pub actor: ActorId,
}

impl DentalRuntime {
    pub fn new(classifier: TomlStatusClassifier) -> DentacallResult<Self> {
        Self::with_trigger(classifier, MockCallTrigger::new())
    }

    pub fn with_trigger(
        classifier: TomlStatusClassifier,
        trigger: MockCallTrigger,
    ) -> DentacallResult<Self> {
        let journal = InMemoryChangeJournal::new();
        let store = InMemoryVerificationStore::with_journal(Arc::new(journal.clone()))
            .with_practice(demo_practice())?;

        let service = VerificationService::new(
            Box::new(CallPayloadExtractor::new()),
            Box::new(DictionaryNormalizer::new()),
            Box::new(classifier),
            Box::new(store.clone()),
            Box::new(trigger.clone()),
        );

        Ok(Self {
            service,
            store,
            journal,
            trigger,
            practice_id: PracticeId::new(PRACTICE_ID),
            actor: ActorId::new("front-desk-1"),
        })
    }
}
