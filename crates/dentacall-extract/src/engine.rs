//! `CallPayloadExtractor`: the `PayloadExtractor` for end-of-call events.
//!
//! Extraction never fails. Each output field is looked up along its own
//! ordered source list and left absent when none of the sources holds a
//! usable value.

use serde_json::{Map, Value};
use tracing::debug;

use dentacall_contracts::call::{
    Attribution, CallDuration, CallTelemetry, ExtractedCall, IdentityFields,
};
use dentacall_core::traits::PayloadExtractor;
use dentacall_fields::{record_field, resolve_record};

use crate::scrape::{scrape_identity, system_prompt, ScrapedIdentity};
use crate::sources::{self, at, first_number, first_text};

/// Extracts benefits, identity, and telemetry from a call-outcome event.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallPayloadExtractor;

impl CallPayloadExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadExtractor for CallPayloadExtractor {
    fn extract(&self, payload: &Value) -> ExtractedCall {
        let event_type = first_text(payload, &[sources::EVENT_TYPE]);
        let fields = structured_result(payload);

        let structured_identity = IdentityFields {
            patient_name: record(&fields, "patientName"),
            patient_dob: record(&fields, "patientDOB"),
            member_id: record(&fields, "memberId"),
            insurance_carrier: record(&fields, "insuranceCarrier"),
        };
        let identity = fill_from_prompt(structured_identity, payload);

        let attribution = Attribution {
            reference_number: record(&fields, "referenceNumber"),
            rep_name: record(&fields, "repName"),
        };

        let telemetry = CallTelemetry {
            call_id: first_text(payload, sources::CALL_ID),
            ended_reason: first_text(payload, sources::ENDED_REASON),
            duration: first_number(payload, sources::DURATION_SECONDS).and_then(call_duration),
            recording_url: first_text(payload, sources::RECORDING_URL),
            transcript: first_text(payload, sources::TRANSCRIPT),
        };

        debug!(
            event_type = ?event_type,
            call_id = ?telemetry.call_id,
            result_fields = fields.len(),
            "call event extracted"
        );

        ExtractedCall {
            event_type,
            fields,
            identity,
            attribution,
            telemetry,
            correlation_id: first_text(payload, sources::CORRELATION_ID),
        }
    }
}

/// The structured result object of the first usable location.
///
/// A location is usable when it is a non-empty object whose first entry
/// (in document order) holds an object `result`. Otherwise the next location
/// is tried; if none is usable the result is empty.
pub fn structured_result(payload: &Value) -> Map<String, Value> {
    for location in sources::STRUCTURED_RESULT {
        let first_result = at(payload, location)
            .and_then(Value::as_object)
            .and_then(|outputs| outputs.values().next())
            .and_then(|entry| entry.get("result"))
            .and_then(Value::as_object);

        if let Some(result) = first_result {
            debug!(location, fields = result.len(), "structured result found");
            return result.clone();
        }
    }
    debug!("no structured result in call event");
    Map::new()
}

/// Format a duration in seconds, rounded to the nearest whole second.
///
/// Negative, NaN, and infinite values yield `None`.
pub fn call_duration(seconds: f64) -> Option<CallDuration> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(CallDuration { seconds: seconds.round() as u64 })
}

fn record(fields: &Map<String, Value>, key: &str) -> Option<String> {
    record_field(key).and_then(|f| resolve_record(fields, f))
}

/// Fill name, DOB, and member ID the structured result left blank.
///
/// The carrier has no prompt fallback.
fn fill_from_prompt(mut identity: IdentityFields, payload: &Value) -> IdentityFields {
    let needs_prompt = identity.patient_name.is_none()
        || identity.patient_dob.is_none()
        || identity.member_id.is_none();
    if !needs_prompt {
        return identity;
    }

    let ScrapedIdentity { patient_name, patient_dob, member_id } =
        system_prompt(payload).map(scrape_identity).unwrap_or_default();

    identity.patient_name = identity.patient_name.or(patient_name);
    identity.patient_dob = identity.patient_dob.or(patient_dob);
    identity.member_id = identity.member_id.or(member_id);
    identity
}
