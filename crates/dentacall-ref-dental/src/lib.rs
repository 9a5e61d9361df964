//! # dentacall-ref-dental
//!
//! Dental reference runtime for the dentacall verification engine.
//!
//! Runs five end-to-end scenarios against the real extractor, normalizer,
//! classifier, store, and journal, with a mock outbound call trigger:
//!
//! 1. **Happy Path**: intake, call placement, status event, complete report.
//! 2. **Voicemail**: nothing captured, classified `failed`.
//! 3. **Legacy Records**: rows from every benefits generation, read without
//!    migration, plus an operator correction stored canonical.
//! 4. **Duplicate Delivery**: concurrent and late copies of one report apply
//!    exactly once; a stray report matches nothing.
//! 5. **Trigger Failure**: the record is failed and the error surfaced.
//!
//! All data is fictional. No external calls are made.

pub mod mock_payloads;
pub mod mock_trigger;
pub mod runtime;
pub mod scenarios;

pub use mock_trigger::MockCallTrigger;
pub use runtime::DentalRuntime;
pub use scenarios::ScenarioReport;
