//! Where each piece of a call-outcome event may live.
//!
//! Every list is ordered by preference; the first location holding a usable
//! value wins. Adding a location the call system starts using is a one-line
//! change here.

use serde_json::Value;

pub const EVENT_TYPE: &str = "message.type";

/// Containers of named structured outputs: `{ "<name>": { "name", "result" } }`.
pub const STRUCTURED_RESULT: &[&str] =
    &["message.artifact.structuredOutputs", "message.analysis.structuredData"];

/// Conversation messages; the system prompt carries the patient identity.
pub const MESSAGES: &str = "message.artifact.messages";

pub const RECORDING_URL: &[&str] = &[
    "message.artifact.recordingUrl",
    "message.artifact.stereoRecordingUrl",
    "message.call.recordingUrl",
];

pub const TRANSCRIPT: &[&str] = &["message.artifact.transcript", "message.call.transcript"];

pub const CALL_ID: &[&str] = &["message.call.id"];

pub const ENDED_REASON: &[&str] = &["message.call.endedReason", "message.endedReason"];

pub const DURATION_SECONDS: &[&str] = &["message.call.duration", "message.durationSeconds"];

pub const CORRELATION_ID: &[&str] =
    &["message.call.metadata.verificationId", "message.metadata.verificationId"];

/// Walk a dotted path through `payload`. `null` counts as absent.
pub fn at<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = payload;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    (!current.is_null()).then_some(current)
}

/// The first non-blank string found along `paths`.
pub fn first_text(payload: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| {
        at(payload, path)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    })
}

/// The first number found along `paths`.
pub fn first_number(payload: &Value, paths: &[&str]) -> Option<f64> {
    paths.iter().find_map(|path| at(payload, path).and_then(Value::as_f64))
}
