//! End-to-end dental verification scenarios.
//!
//! Each scenario wires the real engine components (extractor, normalizer,
//! classifier, store, journal) around a mock call trigger, drives a
//! realistic sequence of requests and call events, prints what happened, and
//! returns a `ScenarioReport` for assertions.

pub mod duplicate_delivery;
pub mod happy_path;
pub mod legacy_records;
pub mod trigger_failure;
pub mod voicemail;

use dentacall_contracts::{error::DentacallResult, verification::Verification};
use dentacall_core::EventAck;

use crate::runtime::DentalRuntime;

/// What a scenario left behind.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// Acknowledgements of every call event delivered, in delivery order.
    pub acks: Vec<EventAck>,
    /// The practice's verifications after the run, newest first.
    pub verifications: Vec<Verification>,
    pub journal_entries: usize,
    pub chain_verified: bool,
}

impl ScenarioReport {
    pub(crate) fn collect(runtime: &DentalRuntime, acks: Vec<EventAck>) -> DentacallResult<Self> {
        Ok(Self {
            acks,
            verifications: runtime.service.list(&runtime.practice_id)?,
            journal_entries: runtime.journal.len(),
            chain_verified: runtime.journal.verify_integrity(),
        })
    }

    pub(crate) fn print_footer(&self, number: usize) {
        println!(
            "  Change journal:         {} ({} entr{} in chain)",
            if self.chain_verified { "VERIFIED" } else { "FAILED" },
            self.journal_entries,
            if self.journal_entries == 1 { "y" } else { "ies" }
        );
        println!();
        println!("  Scenario {} complete.", number);
        println!();
    }
}

pub(crate) fn describe_ack(ack: &EventAck) -> String {
    match ack {
        EventAck::Ignored { event_type } => {
            format!("ignored ({})", event_type.as_deref().unwrap_or("no event type"))
        }
        EventAck::Applied { status, .. } => format!("applied -> {}", status),
        EventAck::AlreadyTerminal { status, .. } => format!("already terminal ({})", status),
        EventAck::Unmatched { call_id } => {
            format!("unmatched (call {})", call_id.as_deref().unwrap_or("unknown"))
        }
    }
}

pub(crate) fn print_indented(text: &str) {
    for line in text.lines() {
        println!("    {}", line);
    }
}
