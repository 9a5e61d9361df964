//! # dentacall-normalize
//!
//! Turns a flat structured result, or a stored document of any earlier
//! generation, into one canonical benefits document.
//!
//! Normalization is pure, deterministic, and idempotent. Fields that were not
//! captured stay absent; nothing is defaulted.

pub mod normalizer;

pub use normalizer::{normalize_fields, DictionaryNormalizer};

// ── Tests ─────────────────────────────────────────────────────────────────────
