//! # dentacall-extract
//!
//! Reads a call-outcome event of any shape and returns the pieces the
//! pipeline needs: the event type, the flat structured result, patient
//! identity, representative attribution, and call telemetry.
//!
//! Extraction is total. Missing, null, or oddly typed data becomes absence in
//! the output; it is never an error and never a panic.
//!
//! ```rust,ignore
//! use dentacall_core::traits::PayloadExtractor;
//! use dentacall_extract::CallPayloadExtractor;
//!
//! let extracted = CallPayloadExtractor::new().extract(&webhook_json);
//! ```

pub mod engine;
pub mod scrape;
pub mod sources;

pub use engine::{call_duration, structured_result, CallPayloadExtractor};
pub use scrape::{scrape_identity, ScrapedIdentity};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use dentacall_core::traits::PayloadExtractor;

    use crate::{call_duration, CallPayloadExtractor};

    fn extract(payload: Value) -> dentacall_contracts::call::ExtractedCall {
        CallPayloadExtractor::new().extract(&payload)
    }

    // ── Structured result location ───────────────────────────────────────────

    #[test]
    fn test_artifact_outputs_take_precedence() {
        let out = extract(json!({
            "message": {
                "type": "end-of-call-report",
                "artifact": { "structuredOutputs": {
                    "abc": { "name": "benefits", "result": { "annual_maximum": 1500 } }
                }},
                "analysis": { "structuredData": {
                    "def": { "name": "benefits", "result": { "annual_maximum": 999 } }
                }}
            }
        }));
        assert_eq!(out.fields.get("annual_maximum"), Some(&json!(1500)));
    }

    #[test]
    fn test_empty_artifact_outputs_fall_back_to_analysis() {
        let out = extract(json!({
            "message": {
                "type": "end-of-call-report",
                "artifact": { "structuredOutputs": {} },
                "analysis": { "structuredData": {
                    "def": { "name": "benefits", "result": { "patient_eligible": true } }
                }}
            }
        }));
        assert_eq!(out.fields.get("patient_eligible"), Some(&json!(true)));
    }

    #[test]
    fn test_first_entry_without_result_falls_back() {
        let out = extract(json!({
            "message": {
                "artifact": { "structuredOutputs": { "abc": { "name": "benefits" } } },
                "analysis": { "structuredData": {
                    "def": { "result": { "plan_type": "PPO" } }
                }}
            }
        }));
        assert_eq!(out.fields.get("plan_type"), Some(&json!("PPO")));
    }

    #[test]
    fn test_first_entry_in_document_order_wins() {
        let out = extract(json!({
            "message": { "artifact": { "structuredOutputs": {
                "zzz": { "result": { "plan_type": "PPO" } },
                "aaa": { "result": { "plan_type": "HMO" } }
            }}}
        }));
        assert_eq!(out.fields.get("plan_type"), Some(&json!("PPO")));
    }

    #[test]
    fn test_arbitrary_json_never_panics() {
        for payload in [
            json!(null),
            json!(42),
            json!("end-of-call-report"),
            json!([1, 2, 3]),
            json!({ "message": null }),
            json!({ "message": { "type": 7, "call": "x", "artifact": [] } }),
            json!({ "message": { "artifact": { "structuredOutputs": { "a": { "result": [] } } } } }),
        ] {
            let out = extract(payload);
            assert!(out.fields.is_empty());
        }
    }

    #[test]
    fn test_event_type_is_read() {
        assert_eq!(
            extract(json!({ "message": { "type": "status-update" } })).event_type.as_deref(),
            Some("status-update")
        );
        assert_eq!(extract(json!({ "message": { "type": 5 } })).event_type, None);
    }

    // ── Identity ─────────────────────────────────────────────────────────────

    #[test]
    fn test_structured_identity_beats_prompt() {
        let out = extract(json!({
            "message": {
                "artifact": {
                    "structuredOutputs": { "a": { "result": {
                        "patient_name": "Sarah Johnson",
                        "insurance_company": "Delta Dental"
                    }}},
                    "messages": [{ "role": "system", "message":
                        "Patient: Someone Else\nDOB: January 5, 1990\nMember ID: A B C" }]
                }
            }
        }));
        assert_eq!(out.identity.patient_name.as_deref(), Some("Sarah Johnson"));
        assert_eq!(out.identity.patient_dob.as_deref(), Some("January 5, 1990"));
        assert_eq!(out.identity.member_id.as_deref(), Some("ABC"));
        assert_eq!(out.identity.insurance_carrier.as_deref(), Some("Delta Dental"));
    }

    #[test]
    fn test_empty_structured_identity_uses_prompt() {
        let out = extract(json!({
            "message": {
                "artifact": {
                    "structuredOutputs": { "a": { "result": { "patient_name": "" } } },
                    "messages": [{ "role": "system", "message": "Patient: Ann Lee" }]
                }
            }
        }));
        assert_eq!(out.identity.patient_name.as_deref(), Some("Ann Lee"));
        assert_eq!(out.identity.patient_dob, None);
    }

    #[test]
    fn test_attribution_is_verbatim() {
        let out = extract(json!({
            "message": { "artifact": { "structuredOutputs": { "a": { "result": {
                "call_reference": "DELTA-TANGO-5829",
                "rep_name": "Maria Thompson"
            }}}}}
        }));
        assert_eq!(out.attribution.reference_number.as_deref(), Some("DELTA-TANGO-5829"));
        assert_eq!(out.attribution.rep_name.as_deref(), Some("Maria Thompson"));
    }

    // ── Telemetry ────────────────────────────────────────────────────────────

    #[test]
    fn test_telemetry_source_order() {
        let out = extract(json!({
            "message": {
                "endedReason": "silence-timed-out",
                "durationSeconds": 30,
                "metadata": { "verificationId": "from-message" },
                "artifact": { "stereoRecordingUrl": "https://rec/stereo.wav", "transcript": "" },
                "call": {
                    "id": "call-1",
                    "recordingUrl": "https://rec/call.wav",
                    "transcript": "AI: Hello",
                    "duration": 104.4,
                    "metadata": { "verificationId": "from-call" }
                }
            }
        }));
        let t = out.telemetry;
        assert_eq!(t.call_id.as_deref(), Some("call-1"));
        assert_eq!(t.ended_reason.as_deref(), Some("silence-timed-out"));
        assert_eq!(t.recording_url.as_deref(), Some("https://rec/stereo.wav"));
        assert_eq!(t.transcript.as_deref(), Some("AI: Hello"));
        assert_eq!(t.duration.map(|d| d.to_string()).as_deref(), Some("1 min 44 sec"));
        assert_eq!(out.correlation_id.as_deref(), Some("from-call"));
    }

    #[test]
    fn test_duration_formatting() {
        let fmt = |s: f64| call_duration(s).map(|d| d.to_string());
        assert_eq!(fmt(104.0).as_deref(), Some("1 min 44 sec"));
        assert_eq!(fmt(59.0).as_deref(), Some("0 min 59 sec"));
        assert_eq!(fmt(60.0).as_deref(), Some("1 min 0 sec"));
        assert_eq!(fmt(0.0).as_deref(), Some("0 min 0 sec"));
        assert_eq!(fmt(59.6).as_deref(), Some("1 min 0 sec"));
        assert_eq!(fmt(-1.0), None);
        assert_eq!(fmt(f64::NAN), None);
    }

    #[test]
    fn test_non_numeric_duration_is_unset() {
        let out = extract(json!({ "message": { "call": { "duration": "104" } } }));
        assert_eq!(out.telemetry.duration, None);
    }
}
