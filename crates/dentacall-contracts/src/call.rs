//! Call intake, call telemetry, and extraction result types.
//!
//! `CallRequest` is what the dashboard submits; `CallPlacement` is what the
//! outbound call trigger receives once intake has validated and prepared it.
//! `ExtractedCall` is what the extractor produces from a call-outcome event.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::practice::{Practice, PracticeId};
use crate::verification::VerificationId;

/// A verification request as submitted by front-desk staff.
///
/// Fields are optional at this layer so intake can report exactly which
/// required field is missing instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub patient_name: Option<String>,
    /// ISO calendar date (`YYYY-MM-DD`).
    #[serde(rename = "patientDOB")]
    pub patient_dob: Option<String>,
    pub member_id: Option<String>,
    pub insurance_carrier: Option<String>,
    pub phone_number: Option<String>,
    pub subscriber_name: Option<String>,
    /// ISO calendar date (`YYYY-MM-DD`); only used with `subscriber_name`.
    #[serde(rename = "subscriberDOB")]
    pub subscriber_dob: Option<String>,
}

/// Patient identity in the form handed to the voice agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientIdentity {
    pub name: String,
    /// Spoken form, e.g. "January 5, 1990".
    pub spoken_dob: String,
    pub member_id: String,
}

/// Subscriber identity, present only when the patient is not the subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberIdentity {
    pub name: String,
    pub spoken_dob: String,
}

/// Everything the outbound call trigger needs to place one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallPlacement {
    pub verification_id: VerificationId,
    pub practice_id: PracticeId,
    pub practice: Practice,
    /// E.164 number of the insurance carrier.
    pub phone_number: String,
    pub patient: PatientIdentity,
    pub subscriber: Option<SubscriberIdentity>,
}

/// The external call system's reference for a placed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReference {
    pub call_id: String,
}

/// Call length, kept in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDuration {
    pub seconds: u64,
}

impl std::fmt::Display for CallDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} min {} sec", self.seconds / 60, self.seconds % 60)
    }
}

/// Telephony-level facts about a finished call. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallTelemetry {
    pub call_id: Option<String>,
    pub ended_reason: Option<String>,
    pub duration: Option<CallDuration>,
    pub recording_url: Option<String>,
    pub transcript: Option<String>,
}

/// Patient identity fields resolved from a call outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityFields {
    pub patient_name: Option<String>,
    pub patient_dob: Option<String>,
    pub member_id: Option<String>,
    pub insurance_carrier: Option<String>,
}

/// Free-text attribution captured from the representative, verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribution {
    pub reference_number: Option<String>,
    pub rep_name: Option<String>,
}

/// The extractor's output for one call-outcome event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCall {
    /// The event discriminator, e.g. `"end-of-call-report"`.
    pub event_type: Option<String>,
    /// The structured result object: a flat bag of candidate benefit fields.
    pub fields: Map<String, Value>,
    pub identity: IdentityFields,
    pub attribution: Attribution,
    pub telemetry: CallTelemetry,
    /// The verification id the call was placed for, if the event carries it.
    pub correlation_id: Option<String>,
}
