//! # dentacall-policy
//!
//! A TOML-driven, first-match classifier that decides whether a finished
//! verification call is `completed` or `failed`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dentacall_policy::TomlStatusClassifier;
//!
//! let classifier = TomlStatusClassifier::builtin()?;
//! // Pass `classifier` to `dentacall_core::VerificationService::new(...)`.
//! ```
//!
//! ## Built-in policy
//!
//! 1. An end reason outside the graceful list → `failed`
//! 2. Neither `eligibility.eligible` nor `maximums.annual` captured → `failed`
//! 3. Otherwise → `completed`

pub mod engine;
pub mod rule;

pub use engine::{TomlStatusClassifier, DEFAULT_POLICY};
pub use rule::{ClassificationRule, PolicyConfig, RuleCondition, RuleStatus};

// ── Tests ─────────────────────────────────────────────────────────────────────
