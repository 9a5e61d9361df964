//! # dentacall-core
//!
//! The call-outcome pipeline for dental benefits verification.
//!
//! This crate provides:
//! - The seam traits (`PayloadExtractor`, `BenefitsNormalizer`,
//!   `StatusClassifier`, `VerificationStore`, `ChangeJournal`, `CallTrigger`)
//! - Call intake (`prepare_call`, phone and date preparation)
//! - The `VerificationService` that runs intake, placement, and terminal
//!   reconciliation in order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dentacall_core::{VerificationService, EventAck};
//!
//! let service = VerificationService::new(extractor, normalizer, classifier, store, trigger);
//! let id = service.start_call(&practice_id, &request, &actor)?;
//! let ack = service.handle_call_event(&webhook_payload)?;
//! ```

pub mod intake;
pub mod service;
pub mod traits;

pub use intake::{normalize_phone_number, prepare_call, spoken_date, PreparedCall};
pub use service::{EventAck, VerificationService};
