//! Scenario 4: Duplicate Delivery
//!
//! The call platform retries its webhook. Two copies of the end-of-call
//! report arrive at the same time, a third arrives late without the
//! verification id in its metadata, and a report for a call nobody placed
//! shows up as well.
//!
//!   1. Exactly one concurrent copy applies the terminal transition
//!   2. The other copies are acknowledged as already terminal
//!   3. The late copy is correlated by call id and also acknowledged
//!   4. The stray report matches nothing and creates nothing

use std::thread;

use dentacall_contracts::error::DentacallResult;
use dentacall_core::EventAck;
use dentacall_policy::TomlStatusClassifier;

use crate::mock_payloads::{delta_dental_result, EndOfCall};
use crate::runtime::{demo_request, DentalRuntime};
use crate::scenarios::{describe_ack, ScenarioReport};

pub fn run_scenario(classifier: &TomlStatusClassifier) -> DentacallResult<ScenarioReport> {
    println!("=== Scenario 4: Duplicate Delivery ===");
    println!();

    let runtime = DentalRuntime::new(classifier.clone())?;
    let id = runtime.service.start_call(&runtime.practice_id, &demo_request(), &runtime.actor)?;
    let call_id = runtime.service.get(id)?.call_id.unwrap_or_default();

    let report = EndOfCall::new(&call_id, "assistant-ended-call")
        .for_verification(id)
        .lasting(187.0)
        .with_result(delta_dental_result());
    let payload = report.to_payload();

    let service = &runtime.service;
    let delivered = &payload;
    let concurrent: Vec<DentacallResult<EventAck>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| scope.spawn(move || service.handle_call_event(delivered)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut acks = Vec::new();
    for ack in concurrent {
        acks.push(ack?);
    }

    let mut late = report.clone();
    late.verification_id = None;
    acks.push(service.handle_call_event(&late.to_payload())?);

    let stray = EndOfCall::new("call-nobody-placed", "customer-ended-call")
        .with_result(delta_dental_result());
    acks.push(service.handle_call_event(&stray.to_payload())?);

    let labels = ["Concurrent copy A", "Concurrent copy B", "Late copy (call id)", "Stray report"];
    for (label, ack) in labels.iter().zip(&acks) {
        println!("  {:<24}{}", format!("{}:", label), describe_ack(ack));
    }
    println!();

    let outcome = ScenarioReport::collect(&runtime, acks)?;
    outcome.print_footer(4);
    Ok(outcome)
}
