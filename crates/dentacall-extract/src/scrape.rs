//! Best-effort recovery of patient identity from the call's system prompt.
//!
//! The voice agent is briefed with labeled lines such as `Patient Name: ...`,
//! `DOB: ...` and `Member ID: ...`. When the structured result omits identity,
//! those lines are the only other source. Every field is independent and
//! optional; nothing here can fail.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::sources::{at, MESSAGES};

/// Identity recovered from the system prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedIdentity {
    pub patient_name: Option<String>,
    pub patient_dob: Option<String>,
    pub member_id: Option<String>,
}

fn name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Patient(?:[ \t]+Name)?:[ \t]*([^\r\n]+)")
            .expect("patient name pattern must compile")
    })
}

fn dob_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)DOB:[ \t]*([^\r\n]+)").expect("DOB pattern must compile")
    })
}

fn member_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Member[ \t]+ID:[ \t]*([^\r\n]+)").expect("member ID pattern must compile")
    })
}

/// Text of the first `system` message under the event's message list.
pub fn system_prompt(payload: &Value) -> Option<&str> {
    at(payload, MESSAGES)?
        .as_array()?
        .iter()
        .find(|m| m.get("role").and_then(Value::as_str) == Some("system"))
        .and_then(|m| {
            m.get("message")
                .and_then(Value::as_str)
                .or_else(|| m.get("content").and_then(Value::as_str))
        })
}

/// Scrape labeled identity lines out of `prompt`.
pub fn scrape_identity(prompt: &str) -> ScrapedIdentity {
    ScrapedIdentity {
        patient_name: capture(name_pattern(), prompt),
        patient_dob: capture(dob_pattern(), prompt),
        member_id: capture(member_id_pattern(), prompt)
            .map(|id| id.split_whitespace().collect::<String>())
            .filter(|id| !id.is_empty()),
    }
}

fn capture(pattern: &Regex, text: &str) -> Option<String> {
    let value = pattern.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then(|| value.to_string())
}
