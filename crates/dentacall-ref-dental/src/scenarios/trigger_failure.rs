//! Scenario 5: Trigger Failure
//!
//! The voice platform rejects the outbound call. The verification that was
//! already created is moved to `failed` and the error reaches the caller. A
//! request missing its member ID is rejected before anything is stored, and
//! a stray report for the failed verification changes nothing.

use dentacall_contracts::{call::CallRequest, error::DentacallResult};
use dentacall_policy::TomlStatusClassifier;

use crate::mock_payloads::{delta_dental_result, EndOfCall};
use crate::mock_trigger::MockCallTrigger;
use crate::runtime::{demo_request, DentalRuntime};
use crate::scenarios::{describe_ack, ScenarioReport};

pub fn run_scenario(classifier: &TomlStatusClassifier) -> DentacallResult<ScenarioReport> {
    println!("=== Scenario 5: Trigger Failure ===");
    println!();

    let runtime = DentalRuntime::with_trigger(
        classifier.clone(),
        MockCallTrigger::failing("carrier IVR unreachable"),
    )?;

    match runtime.service.start_call(&runtime.practice_id, &demo_request(), &runtime.actor) {
        Ok(id) => println!("  Call placed:            {} (unexpected)", id),
        Err(e) => println!("  Call request:           {}", e),
    }

    let incomplete = CallRequest { member_id: None, ..demo_request() };
    match runtime.service.start_call(&runtime.practice_id, &incomplete, &runtime.actor) {
        Ok(id) => println!("  Incomplete request:     accepted as {} (unexpected)", id),
        Err(e) => println!("  Incomplete request:     {}", e),
    }

    let mut acks = Vec::new();
    if let Some(placement) = runtime.trigger.placements().first() {
        let stray = EndOfCall::new("call-never-connected", "customer-ended-call")
            .for_verification(placement.verification_id)
            .with_result(delta_dental_result());
        let ack = runtime.service.handle_call_event(&stray.to_payload())?;
        println!("  Stray report:           {}", describe_ack(&ack));
        acks.push(ack);
    }
    println!();

    let outcome = ScenarioReport::collect(&runtime, acks)?;
    for v in &outcome.verifications {
        println!("  {} -> {}", v.id, v.status);
    }
    outcome.print_footer(5);
    Ok(outcome)
}
