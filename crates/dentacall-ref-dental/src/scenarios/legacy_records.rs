//! Scenario 3: Legacy Records
//!
//! A practice's history holds rows written by every earlier version of the
//! dashboard: camelCase documents, nested legacy groups, a raw first-
//! generation result, and one row whose benefits are not JSON at all. Each is
//! read through the field dictionary without migration. An operator then
//! corrects an old record, and the corrected document is stored canonical.

use chrono::{Duration, Utc};
use serde_json::Value;

use dentacall_contracts::{
    error::DentacallResult,
    practice::{ActorId, PracticeId},
    verification::{Verification, VerificationId, VerificationPatch, VerificationStatus},
};
use dentacall_policy::TomlStatusClassifier;
use dentacall_present::{display_field, summarize_practice, view};

use crate::mock_payloads::{legacy_flat_result, stored_document_v1, stored_document_v2};
use crate::runtime::{DentalRuntime, PRACTICE_ID};
use crate::scenarios::ScenarioReport;

/// A row as an earlier version would have left it.
fn legacy_row(
    patient: &str,
    carrier: &str,
    status: VerificationStatus,
    benefits: Option<String>,
    days_ago: i64,
) -> Verification {
    let at = Utc::now() - Duration::days(days_ago);
    Verification {
        id: VerificationId::new(),
        practice_id: PracticeId::new(PRACTICE_ID),
        patient_name: patient.to_string(),
        patient_dob: "March 14, 1982".to_string(),
        member_id: "LEG000111".to_string(),
        insurance_carrier: carrier.to_string(),
        phone_number: "+18005550123".to_string(),
        status,
        call_id: Some(format!("legacy-call-{}", days_ago)),
        call_duration: Some("3 min 12 sec".to_string()),
        recording_url: None,
        transcript: None,
        benefits,
        reference_number: None,
        rep_name: None,
        created_at: at,
        updated_at: at,
        created_by_id: ActorId::new("front-desk-legacy"),
    }
}

pub fn run_scenario(classifier: &TomlStatusClassifier) -> DentacallResult<ScenarioReport> {
    println!("=== Scenario 3: Legacy Records ===");
    println!();

    let runtime = DentalRuntime::new(classifier.clone())?;

    let rows = [
        legacy_row(
            "Alan Brooks",
            "Cigna",
            VerificationStatus::Completed,
            Some(stored_document_v1().to_string()),
            400,
        ),
        legacy_row(
            "Robert Chen",
            "MetLife",
            VerificationStatus::Completed,
            Some(legacy_flat_result().to_string()),
            300,
        ),
        legacy_row(
            "Maya Patel",
            "Guardian",
            VerificationStatus::Completed,
            Some(stored_document_v2().to_string()),
            200,
        ),
        legacy_row(
            "Tom Reyes",
            "Aetna",
            VerificationStatus::Failed,
            Some("None".to_string()),
            100,
        ),
    ];
    let first_id = rows[0].id;
    for row in rows {
        runtime.store.import(row)?;
    }

    for stored in runtime.service.list(&runtime.practice_id)? {
        let shown = view(&stored);
        let annual = shown
            .field("maximums.annual")
            .map(display_field)
            .unwrap_or_default();
        let deductible_met = shown
            .field("deductible.met")
            .map(display_field)
            .unwrap_or_default();
        println!(
            "  {:<12} {:<9} {:>2} captured  annual max {:<13} deductible {}{}",
            stored.patient_name,
            stored.insurance_carrier,
            shown.captured_count(),
            annual,
            deductible_met,
            if shown.benefits_unreadable { "  [benefits unreadable]" } else { "" }
        );
    }
    println!();

    // Operator correction with a document in the old camelCase shape.
    let mut corrected_document = stored_document_v1();
    if let Some(doc) = corrected_document.as_object_mut() {
        doc.insert("remainingMaximum".to_string(), Value::from(250));
    }
    let corrected = runtime.service.correct(
        first_id,
        VerificationPatch {
            benefits: Some(corrected_document),
            rep_name: Some("Dana (callback)".to_string()),
            ..VerificationPatch::default()
        },
    )?;
    println!(
        "  Correction stored as:   {}",
        corrected.benefits.as_deref().unwrap_or("(none)")
    );

    let summary = summarize_practice(&runtime.service.list(&runtime.practice_id)?);
    println!(
        "  Practice summary:       {} total, {} completed, {} failed, {}h saved",
        summary.total, summary.completed, summary.failed, summary.hours_saved
    );
    println!();

    let outcome = ScenarioReport::collect(&runtime, Vec::new())?;
    outcome.print_footer(3);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use dentacall_contracts::benefits::FieldValue;

    use super::*;

    fn run() -> ScenarioReport {
        run_scenario(&TomlStatusClassifier::builtin().unwrap()).unwrap()
    }

    fn by_patient<'a>(report: &'a ScenarioReport, name: &str) -> &'a Verification {
        report
            .verifications
            .iter()
            .find(|v| v.patient_name == name)
            .unwrap()
    }

    #[test]
    fn test_every_generation_is_readable() {
        let report = run();
        assert_eq!(report.verifications.len(), 4);

        let metlife = view(by_patient(&report, "Robert Chen"));
        assert_eq!(metlife.value("maximums.annual"), Some(&FieldValue::Number(2000u64.into())));
        assert_eq!(metlife.value("coverage.major"), Some(&FieldValue::Number(50u64.into())));

        let guardian = view(by_patient(&report, "Maya Patel"));
        assert_eq!(
            guardian.value("preventiveCodes.fluoride.ageLimit"),
            Some(&FieldValue::Text("Under 19".to_string()))
        );
        assert_eq!(guardian.value("deductible.met"), Some(&FieldValue::Boolean(false)));

        let aetna = view(by_patient(&report, "Tom Reyes"));
        assert!(aetna.benefits_unreadable);
        assert_eq!(aetna.captured_count(), 0);
    }

    #[test]
    fn test_correction_is_stored_canonical() {
        let report = run();
        let corrected = by_patient(&report, "Alan Brooks");

        let benefits: Value = serde_json::from_str(corrected.benefits.as_deref().unwrap()).unwrap();
        assert_eq!(benefits["maximums"]["remaining"], 250);
        assert_eq!(benefits["maximums"]["annual"], 1000);
        assert!(benefits.get("annualMaximum").is_none());
        assert!(benefits.get("frequencies").is_none());
        assert_eq!(corrected.rep_name.as_deref(), Some("Dana (callback)"));
        assert_eq!(corrected.status, VerificationStatus::Completed);
    }

    #[test]
    fn test_history_is_newest_first() {
        let report = run();
        let names: Vec<&str> =
            report.verifications.iter().map(|v| v.patient_name.as_str()).collect();
        assert_eq!(names, vec!["Tom Reyes", "Maya Patel", "Robert Chen", "Alan Brooks"]);
        // four imports and one correction
        assert_eq!(report.journal_entries, 5);
        assert!(report.chain_verified);
    }
}
