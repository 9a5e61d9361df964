//! dentacall: dental benefits verification engine CLI
//!
//! Runs the reference scenarios, or pushes a single captured payload or
//! stored document through the pipeline and prints the breakdown sheet.
//!
//! Usage:
//!   cargo run -p dentacall -- run-all
//!   cargo run -p dentacall -- voicemail
//!   cargo run -p dentacall -- --policy strict.toml process payload.json
//!   cargo run -p dentacall -- render benefits.json

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dentacall_contracts::{
    error::{DentacallError, DentacallResult},
    practice::{ActorId, PracticeId},
    verification::{Verification, VerificationId, VerificationStatus},
};
use dentacall_core::traits::{BenefitsNormalizer, PayloadExtractor, StatusClassifier};
use dentacall_extract::CallPayloadExtractor;
use dentacall_normalize::DictionaryNormalizer;
use dentacall_policy::TomlStatusClassifier;
use dentacall_present::{render_sheet, view};
use dentacall_ref_dental::scenarios::{
    duplicate_delivery, happy_path, legacy_records, trigger_failure, voicemail,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// dentacall: insurance verification calls, normalized.
#[derive(Parser)]
#[command(
    name = "dentacall",
    about = "Dental benefits verification call-outcome engine",
    long_about = "Runs the dental reference scenarios, or processes a captured call payload\n\
                  and renders the normalized insurance breakdown."
)]
struct Cli {
    /// Classification policy TOML. Defaults to the built-in policy.
    #[arg(long, global = true, value_name = "FILE")]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all five reference scenarios in sequence.
    RunAll,
    /// Scenario 1: complete call with every benefit captured.
    HappyPath,
    /// Scenario 2: voicemail, nothing captured.
    Voicemail,
    /// Scenario 3: stored rows from every benefits generation.
    LegacyRecords,
    /// Scenario 4: duplicate and stray webhook deliveries.
    DuplicateDelivery,
    /// Scenario 5: the outbound call could not be placed.
    TriggerFailure,
    /// Extract, normalize and classify one call-outcome payload (JSON file).
    Process {
        payload: PathBuf,
    },
    /// Render a stored benefits document of any generation (JSON file).
    Render {
        document: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // RUST_LOG=debug shows every extraction and classification decision.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_classifier(cli.policy.as_deref()).and_then(|classifier| {
        match cli.command {
            Command::RunAll => {
                print_banner();
                run_all(&classifier)
            }
            Command::HappyPath => scenario(|| happy_path::run_scenario(&classifier)),
            Command::Voicemail => scenario(|| voicemail::run_scenario(&classifier)),
            Command::LegacyRecords => scenario(|| legacy_records::run_scenario(&classifier)),
            Command::DuplicateDelivery => {
                scenario(|| duplicate_delivery::run_scenario(&classifier))
            }
            Command::TriggerFailure => scenario(|| trigger_failure::run_scenario(&classifier)),
            Command::Process { payload } => process(&classifier, &payload),
            Command::Render { document } => render(&document),
        }
    });

    if let Err(e) = result {
        eprintln!("dentacall error: {}", e);
        std::process::exit(1);
    }
}

fn load_classifier(path: Option<&Path>) -> DentacallResult<TomlStatusClassifier> {
    let classifier = match path {
        Some(path) => TomlStatusClassifier::from_file(path)?,
        None => TomlStatusClassifier::builtin()?,
    };
    info!(
        policy = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "built-in".to_string()),
        rules = classifier.config().rules.len(),
        "classification policy loaded"
    );
    Ok(classifier)
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn scenario<T>(run: impl FnOnce() -> DentacallResult<T>) -> DentacallResult<()> {
    print_banner();
    run()?;
    Ok(())
}

fn run_all(classifier: &TomlStatusClassifier) -> DentacallResult<()> {
    happy_path::run_scenario(classifier)?;
    voicemail::run_scenario(classifier)?;
    legacy_records::run_scenario(classifier)?;
    duplicate_delivery::run_scenario(classifier)?;
    trigger_failure::run_scenario(classifier)?;
    println!("All scenarios completed successfully.");
    Ok(())
}

// ── Single documents ──────────────────────────────────────────────────────────

fn read_json(path: &Path) -> DentacallResult<Value> {
    let raw = std::fs::read_to_string(path).map_err(|e| DentacallError::ConfigError {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&raw).map_err(|e| DentacallError::ConfigError {
        reason: format!("'{}' is not valid JSON: {}", path.display(), e),
    })
}

/// Run one payload through the pipeline without touching a store.
fn process(classifier: &TomlStatusClassifier, path: &Path) -> DentacallResult<()> {
    let payload = read_json(path)?;
    let extracted = CallPayloadExtractor::new().extract(&payload);

    let event_type = extracted.event_type.as_deref().unwrap_or("(none)");
    println!("Event type:     {}", event_type);
    if !classifier.is_terminal_event(event_type) {
        println!("Not a terminal event; nothing would be recorded.");
        return Ok(());
    }

    let benefits = DictionaryNormalizer::new().normalize(&extracted.fields);
    let status = classifier.classify(&benefits, &extracted.telemetry);
    println!("Status:         {}", status);
    println!(
        "Ended reason:   {}",
        extracted.telemetry.ended_reason.as_deref().unwrap_or("(none)")
    );
    println!();

    let benefits = if benefits.is_empty() {
        None
    } else {
        Some(benefits.to_json_string().map_err(|e| DentacallError::Serialization {
            reason: e.to_string(),
        })?)
    };
    let identity = extracted.identity;
    let record = Verification {
        patient_name: identity.patient_name.unwrap_or_default(),
        patient_dob: identity.patient_dob.unwrap_or_default(),
        member_id: identity.member_id.unwrap_or_default(),
        insurance_carrier: identity.insurance_carrier.unwrap_or_default(),
        call_id: extracted.telemetry.call_id,
        call_duration: extracted.telemetry.duration.map(|d| d.to_string()),
        recording_url: extracted.telemetry.recording_url,
        reference_number: extracted.attribution.reference_number,
        rep_name: extracted.attribution.rep_name,
        ..unsaved_record(status, benefits)
    };
    println!("{}", render_sheet(&view(&record)));
    Ok(())
}

/// Render a stored document as the dashboard would, without rewriting it.
fn render(path: &Path) -> DentacallResult<()> {
    let raw = std::fs::read_to_string(path).map_err(|e| DentacallError::ConfigError {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })?;
    let record = unsaved_record(VerificationStatus::Completed, Some(raw.trim().to_string()));
    println!("{}", render_sheet(&view(&record)));
    Ok(())
}

/// A record that exists only for rendering.
fn unsaved_record(status: VerificationStatus, benefits: Option<String>) -> Verification {
    let now = Utc::now();
    Verification {
        id: VerificationId::new(),
        practice_id: PracticeId::new("cli"),
        patient_name: String::new(),
        patient_dob: String::new(),
        member_id: String::new(),
        insurance_carrier: String::new(),
        phone_number: String::new(),
        status,
        call_id: None,
        call_duration: None,
        recording_url: None,
        transcript: None,
        benefits,
        reference_number: None,
        rep_name: None,
        created_at: now,
        updated_at: now,
        created_by_id: ActorId::new("cli"),
    }
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("dentacall: Insurance Verification Calls");
    println!("Dental Reference Runtime");
    println!("=======================================");
    println!();
    println!("Pipeline per call-outcome event:");
    println!("  [1] Extract candidate fields from the event, whatever its shape");
    println!("  [2] Normalize every schema generation into one canonical document");
    println!("  [3] Classify completed / failed from policy rules, once only");
    println!("  [4] Conditional terminal update + SHA-256 chained change journal");
    println!("  [5] Render through the field dictionary, never migrating old rows");
    println!();
}
