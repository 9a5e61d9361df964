//! Scenario 2: Voicemail
//!
//! The carrier's line goes to voicemail. The report arrives with no
//! structured result and an ungraceful end reason; the verification is
//! classified `failed` and every benefit shows as not captured.

use dentacall_contracts::error::DentacallResult;
use dentacall_policy::TomlStatusClassifier;
use dentacall_present::{render_sheet, view};

use crate::mock_payloads::{agent_prompt, EndOfCall};
use crate::runtime::{demo_request, DentalRuntime};
use crate::scenarios::{describe_ack, print_indented, ScenarioReport};

pub fn run_scenario(classifier: &TomlStatusClassifier) -> DentacallResult<ScenarioReport> {
    println!("=== Scenario 2: Voicemail ===");
    println!();

    let runtime = DentalRuntime::new(classifier.clone())?;
    let id = runtime.service.start_call(&runtime.practice_id, &demo_request(), &runtime.actor)?;
    let placed = runtime.service.get(id)?;
    let call_id = placed.call_id.clone().unwrap_or_default();

    let report = EndOfCall::new(&call_id, "voicemail")
        .for_verification(id)
        .lasting(21.0)
        .with_prompt(agent_prompt(&placed.patient_name, &placed.patient_dob, &placed.member_id));
    let ack = runtime.service.handle_call_event(&report.to_payload())?;

    println!("  Verification:           {}", id);
    println!("  Ended reason:           voicemail");
    println!("  End-of-call report:     {}", describe_ack(&ack));
    println!();

    let stored = runtime.service.get(id)?;
    let shown = view(&stored);
    println!("  Captured fields:        {}", shown.captured_count());
    println!();
    print_indented(&render_sheet(&shown));
    println!();

    let outcome = ScenarioReport::collect(&runtime, vec![ack])?;
    outcome.print_footer(2);
    Ok(outcome)
}
