//! # dentacall-contracts
//!
//! Shared types, records, and error contracts for the dentacall
//! benefits-verification engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod benefits;
pub mod call;
pub mod error;
pub mod journal;
pub mod practice;
pub mod verification;
