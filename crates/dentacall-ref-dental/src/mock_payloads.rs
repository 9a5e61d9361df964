//! Simulated call-system events and stored benefits documents.
//!
//! Every value here is fictional. The shapes mirror what the voice platform
//! delivers and what earlier versions of the dashboard persisted.

use serde_json::{json, Value};

use dentacall_contracts::verification::VerificationId;

// ── Call events ──────────────────────────────────────────────────────────────

/// An end-of-call report under construction.
#[derive(Debug, Clone)]
pub struct EndOfCall {
    /// Omitted from the metadata when `None`, forcing call-id correlation.
    pub verification_id: Option<VerificationId>,
    pub call_id: String,
    pub ended_reason: String,
    pub duration_seconds: f64,
    /// The flat structured result. `None` leaves the outputs empty.
    pub result: Option<Value>,
    pub system_prompt: Option<String>,
}

impl EndOfCall {
    pub fn new(call_id: impl Into<String>, ended_reason: impl Into<String>) -> Self {
        Self {
            verification_id: None,
            call_id: call_id.into(),
            ended_reason: ended_reason.into(),
            duration_seconds: 0.0,
            result: None,
            system_prompt: None,
        }
    }

    pub fn for_verification(mut self, id: VerificationId) -> Self {
        self.verification_id = Some(id);
        self
    }

    pub fn lasting(mut self, seconds: f64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// The webhook body the call system would send.
    pub fn to_payload(&self) -> Value {
        let metadata = match self.verification_id {
            Some(id) => json!({ "verificationId": id.to_string() }),
            None => json!({}),
        };
        let outputs = match &self.result {
            Some(result) => json!({
                "7f3c2a10": { "name": "dental_benefits", "result": result }
            }),
            None => json!({}),
        };
        let messages = match &self.system_prompt {
            Some(prompt) => json!([
                { "role": "system", "message": prompt },
                { "role": "bot", "message": "Hi, I'm calling to verify dental benefits." }
            ]),
            None => json!([]),
        };

        json!({
            "message": {
                "type": "end-of-call-report",
                "endedReason": self.ended_reason,
                "call": {
                    "id": self.call_id,
                    "duration": self.duration_seconds,
                    "metadata": metadata
                },
                "artifact": {
                    "recordingUrl": format!("https://recordings.example.com/{}.wav", self.call_id),
                    "transcript": "AI: Hi, I'm calling from the dental office to verify benefits.\nRep: Sure, I can help with that.",
                    "messages": messages,
                    "structuredOutputs": outputs
                }
            }
        })
    }
}

/// A mid-call status event. Never terminal.
pub fn status_update(call_id: &str, status: &str) -> Value {
    json!({
        "message": {
            "type": "status-update",
            "status": status,
            "call": { "id": call_id }
        }
    })
}

/// The system prompt the voice agent is briefed with.
pub fn agent_prompt(patient_name: &str, spoken_dob: &str, member_id: &str) -> String {
    format!(
        "You are calling on behalf of Bright Smiles Dental.\n\
         Patient Name: {patient_name}\n\
         DOB: {spoken_dob}\n\
         Member ID: {member_id}\n\
         Collect eligibility, maximums, deductible and frequencies."
    )
}

// ── Structured results (as the call system returns them today) ──────────────

/// A complete, current-generation structured result.
pub fn delta_dental_result() -> Value {
    json!({
        "insurance_company": "Delta Dental",
        "call_reference": "DELTA-5829",
        "rep_name": "Maria",
        "patient_eligible": true,
        "effective_date": "01/01/2024",
        "in_network": true,
        "plan_type": "PPO",
        "benefit_year": "Calendar",
        "annual_maximum": 1500,
        "maximum_used": 350,
        "maximum_remaining": 1150,
        "deductible": 50,
        "deductible_met": true,
        "deductible_amount_met": 50,
        "waiting_period_preventive": "None",
        "waiting_period_basic": "6 months",
        "waiting_period_major": "12 months",
        "missing_tooth_clause": false,
        "downgrade_fillings": true,
        "coverage_diagnostic": 100,
        "coverage_preventive": 100,
        "coverage_basic": 80,
        "coverage_major": 50,
        "frequency_bwx": "Once every 12 months",
        "history_bwx": "07/15/2024",
        "frequency_d1110": "2x per calendar year",
        "history_d1110": "07/15/2024",
        "fluoride_covered": true,
        "fluoride_age_limit": "Under 16",
        "implants_covered": false,
        "portal_only_fields": ["history_pano"],
        "notes": "Posterior composites downgraded to amalgam."
    })
}

/// A first-generation structured result, still sent by older assistants.
pub fn legacy_flat_result() -> Value {
    json!({
        "patient_name": "Robert Chen",
        "member_id": "MET889900",
        "insurance_carrier": "MetLife",
        "reference_number": "ML-20240915-77",
        "rep_name": "James",
        "patient_eligible": true,
        "plan_type": "PPO",
        "annual_maximum": 2000,
        "remaining_maximum": 1800,
        "deductible": 75,
        "deductible_met": 0,
        "preventive_coverage": 100,
        "basic_coverage": 80,
        "major_coverage": 50,
        "prophy_frequency": "2x per year",
        "bwx_frequency": "1x per year",
        "waiting_periods": "None"
    })
}

// ── Stored documents written by earlier dashboard versions ──────────────────

/// A first persisted camelCase document.
pub fn stored_document_v1() -> Value {
    json!({
        "eligible": true,
        "effectiveDate": "03/01/2023",
        "planType": "PPO",
        "benefitYear": "Calendar",
        "annualMaximum": 1000,
        "remainingMaximum": 0,
        "deductible": 50,
        "deductibleMet": 50,
        "coverage": { "preventive": 100, "basic": 70, "major": 50 },
        "frequencies": { "prophy": "2x per year", "bwx": "1x per year", "pano": "1x per 5 years" },
        "waitingPeriods": "12 months on major"
    })
}

/// The expanded persisted document with nested legacy groups.
pub fn stored_document_v2() -> Value {
    json!({
        "eligible": true,
        "inNetwork": false,
        "annualMaximum": 2500,
        "maximumUsed": 400,
        "deductible": 100,
        "deductibleMet": false,
        "frequencies": { "exams": "2x per year", "srp": "1 per quadrant every 24 months" },
        "history": { "prophy": "02/10/2024", "bwx": "02/10/2024" },
        "specificCodes": { "d4346Coverage": 80, "d7210Coverage": 80 },
        "fluoride": { "covered": true, "ageLimit": "Under 19" },
        "crowns": { "covered": true, "coverage": 50 },
        "implants": { "covered": true },
        "notes": "Crowns limited to 1 per tooth every 5 years."
    })
}
