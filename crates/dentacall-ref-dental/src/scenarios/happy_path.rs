//! Scenario 1: Happy Path
//!
//! Front-desk staff request a verification, the call is placed, a status
//! event arrives mid-call, and the end-of-call report carries a complete,
//! current-generation structured result.
//!
//!   1. Intake normalizes the phone number and speaks the DOB
//!   2. The record is created `in_progress` and the call placed
//!   3. The status event is acknowledged without any state change
//!   4. The report is normalized, classified `completed`, and stored once
//!   5. The breakdown sheet is rendered from the stored record

use dentacall_contracts::error::DentacallResult;
use dentacall_policy::TomlStatusClassifier;
use dentacall_present::{render_sheet, view};

use crate::mock_payloads::{agent_prompt, delta_dental_result, status_update, EndOfCall};
use crate::runtime::{demo_request, DentalRuntime};
use crate::scenarios::{describe_ack, print_indented, ScenarioReport};

pub fn run_scenario(classifier: &TomlStatusClassifier) -> DentacallResult<ScenarioReport> {
    println!("=== Scenario 1: Happy Path ===");
    println!();

    let runtime = DentalRuntime::new(classifier.clone())?;
    let request = demo_request();

    let id = runtime.service.start_call(&runtime.practice_id, &request, &runtime.actor)?;
    let placed = runtime.service.get(id)?;
    let call_id = placed.call_id.clone().unwrap_or_default();

    println!("  Verification:           {}", id);
    println!("  Dialing:                {}", placed.phone_number);
    println!("  Patient DOB (spoken):   {}", placed.patient_dob);
    println!("  Call id:                {}", call_id);

    let mut acks = Vec::new();
    acks.push(runtime.service.handle_call_event(&status_update(&call_id, "in-progress"))?);
    println!("  Status event:           {}", describe_ack(&acks[0]));

    let report = EndOfCall::new(&call_id, "customer-ended-call")
        .for_verification(id)
        .lasting(104.4)
        .with_result(delta_dental_result())
        .with_prompt(agent_prompt(&placed.patient_name, &placed.patient_dob, &placed.member_id));
    acks.push(runtime.service.handle_call_event(&report.to_payload())?);
    println!("  End-of-call report:     {}", describe_ack(&acks[1]));
    println!();

    let stored = runtime.service.get(id)?;
    print_indented(&render_sheet(&view(&stored)));
    println!();

    let outcome = ScenarioReport::collect(&runtime, acks)?;
    outcome.print_footer(1);
    Ok(outcome)
}
