//! Classification rule types and configuration schema.
//!
//! A `PolicyConfig` is deserialized from TOML and holds an ordered list of
//! `ClassificationRule`s. Rules are evaluated in declaration order; the first
//! rule whose conditions all hold decides the status. If none matches, the
//! configured `default` applies.

use serde::{Deserialize, Serialize};

use dentacall_contracts::{
    benefits::BenefitsDocument, call::CallTelemetry, verification::VerificationStatus,
};

/// A terminal status, as written in TOML.
///
/// ```toml
/// status = "completed"
/// status = "failed"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleStatus {
    Completed,
    Failed,
}

impl From<RuleStatus> for VerificationStatus {
    fn from(status: RuleStatus) -> Self {
        match status {
            RuleStatus::Completed => VerificationStatus::Completed,
            RuleStatus::Failed => VerificationStatus::Failed,
        }
    }
}

/// The conditions of one rule. Every condition that is set must hold.
/// A rule with no conditions matches every call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleCondition {
    /// The call has an end reason and it is not in `graceful_end_reasons`.
    #[serde(default)]
    pub ungraceful_end: bool,

    /// Every listed canonical benefit path is absent.
    #[serde(default)]
    pub missing_all: Vec<String>,

    /// At least one listed canonical benefit path is absent.
    #[serde(default)]
    pub missing_any: Vec<String>,

    /// The call's end reason is one of these.
    #[serde(default)]
    pub end_reason_in: Vec<String>,
}

impl RuleCondition {
    /// Every canonical path this condition refers to.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.missing_all.iter().chain(self.missing_any.iter()).map(String::as_str)
    }

    /// Return true if every set condition holds.
    pub fn matches(
        &self,
        benefits: &BenefitsDocument,
        telemetry: &CallTelemetry,
        graceful_end_reasons: &[String],
    ) -> bool {
        let reason = telemetry.ended_reason.as_deref();

        if self.ungraceful_end {
            let ungraceful = reason.is_some_and(|r| !graceful_end_reasons.iter().any(|g| g == r));
            if !ungraceful {
                return false;
            }
        }

        if !self.missing_all.is_empty()
            && !self.missing_all.iter().all(|p| benefits.get_path(p).is_none())
        {
            return false;
        }

        if !self.missing_any.is_empty()
            && !self.missing_any.iter().any(|p| benefits.get_path(p).is_none())
        {
            return false;
        }

        if !self.end_reason_in.is_empty()
            && !reason.is_some_and(|r| self.end_reason_in.iter().any(|e| e == r))
        {
            return false;
        }

        true
    }
}

/// A single classification rule loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    /// Stable identifier used in logs and error messages.
    pub id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub when: RuleCondition,

    /// The status this rule produces when it matches.
    pub status: RuleStatus,
}

/// The top-level structure deserialized from a TOML policy file.
///
/// ```toml
/// default = "completed"
/// graceful_end_reasons = ["customer-ended-call", "assistant-ended-call", "hangup"]
/// terminal_event_types = ["end-of-call-report"]
///
/// [[rules]]
/// id = "ungraceful-end"
/// status = "failed"
/// [rules.when]
/// ungraceful-end = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Status when no rule matches.
    pub default: RuleStatus,

    #[serde(default)]
    pub graceful_end_reasons: Vec<String>,

    pub terminal_event_types: Vec<String>,

    /// Ordered list of rules. First match wins.
    #[serde(default)]
    pub rules: Vec<ClassificationRule>,
}
