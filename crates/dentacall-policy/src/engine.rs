//! TOML-driven status classifier.
//!
//! `TomlStatusClassifier` loads a `PolicyConfig` and implements the
//! `StatusClassifier` trait from dentacall-core.
//!
//! Evaluation algorithm:
//!
//! 1. Iterate rules in declaration order.
//! 2. The first rule whose conditions all hold decides the status.
//! 3. If no rule matched, the configured `default` applies.
//!
//! Benefit paths named in conditions are checked against the field
//! dictionary at load time, so a typo fails the load instead of silently
//! never matching.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use dentacall_contracts::{
    benefits::BenefitsDocument,
    call::CallTelemetry,
    error::{DentacallError, DentacallResult},
    verification::VerificationStatus,
};
use dentacall_core::traits::StatusClassifier;

use crate::rule::PolicyConfig;

/// The policy compiled into the binary.
pub const DEFAULT_POLICY: &str = include_str!("../policies/default.toml");

/// A `StatusClassifier` that reads its rules from a TOML document.
///
/// ```rust,ignore
/// use dentacall_policy::TomlStatusClassifier;
///
/// let classifier = TomlStatusClassifier::from_file(Path::new("policies/default.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct TomlStatusClassifier {
    config: PolicyConfig,
}

impl TomlStatusClassifier {
    /// The compiled-in default policy.
    pub fn builtin() -> DentacallResult<Self> {
        Self::from_toml_str(DEFAULT_POLICY)
    }

    /// Parse `s` as TOML and build a classifier.
    ///
    /// Returns `DentacallError::ConfigError` if the TOML is malformed, does
    /// not match `PolicyConfig`, or names an unknown benefit path.
    pub fn from_toml_str(s: &str) -> DentacallResult<Self> {
        let config: PolicyConfig = toml::from_str(s).map_err(|e| DentacallError::ConfigError {
            reason: format!("failed to parse classification policy TOML: {}", e),
        })?;
        validate(&config)?;
        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as a classification policy.
    pub fn from_file(path: &Path) -> DentacallResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DentacallError::ConfigError {
            reason: format!("failed to read policy file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }
}

fn validate(config: &PolicyConfig) -> DentacallResult<()> {
    let mut ids = HashSet::new();
    for rule in &config.rules {
        if !ids.insert(rule.id.as_str()) {
            return Err(DentacallError::ConfigError {
                reason: format!("duplicate rule id '{}'", rule.id),
            });
        }
        for path in rule.when.paths() {
            if dentacall_fields::field(path).is_none() {
                return Err(DentacallError::ConfigError {
                    reason: format!("rule '{}' refers to unknown benefit path '{}'", rule.id, path),
                });
            }
        }
    }
    if config.terminal_event_types.is_empty() {
        return Err(DentacallError::ConfigError {
            reason: "terminal_event_types must name at least one event type".to_string(),
        });
    }
    Ok(())
}

impl StatusClassifier for TomlStatusClassifier {
    fn is_terminal_event(&self, event_type: &str) -> bool {
        self.config.terminal_event_types.iter().any(|t| t == event_type)
    }

    fn classify(
        &self,
        benefits: &BenefitsDocument,
        telemetry: &CallTelemetry,
    ) -> VerificationStatus {
        for rule in &self.config.rules {
            if rule.when.matches(benefits, telemetry, &self.config.graceful_end_reasons) {
                debug!(
                    rule_id = %rule.id,
                    status = ?rule.status,
                    ended_reason = ?telemetry.ended_reason,
                    "classification rule matched"
                );
                return rule.status.into();
            }
        }

        debug!(
            status = ?self.config.default,
            ended_reason = ?telemetry.ended_reason,
            "no classification rule matched; using default"
        );
        self.config.default.into()
    }
}
