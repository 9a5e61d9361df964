//! # dentacall-fields
//!
//! The benefit field dictionary: one versioned table that names every
//! benefit field, its kind, its canonical path, and every name it has had in
//! earlier payload and document generations.
//!
//! The normalizer uses it to write canonical documents; the presentation
//! adapter uses it to read documents of any generation. Neither keeps its own
//! list of field names.
//!
//! ```rust,ignore
//! use dentacall_fields::{benefit_fields, resolve};
//!
//! for field in benefit_fields() {
//!     if let Some(hit) = resolve(&payload, field) {
//!         println!("{} = {:?} (from {})", field.path, hit.value, hit.source);
//!     }
//! }
//! ```

pub mod dictionary;
pub mod resolve;

pub use dictionary::{Alias, BenefitField, Category, RecordField};
pub use resolve::{lookup, resolve, resolve_record, Resolved};

/// Every benefit field, grouped by category in display order.
pub fn benefit_fields() -> &'static [BenefitField] {
    dictionary::BENEFIT_FIELDS
}

/// Verification-level fields the call may capture.
pub fn record_fields() -> &'static [RecordField] {
    dictionary::RECORD_FIELDS
}

/// Benefit categories in display order.
pub fn categories() -> &'static [Category] {
    dictionary::CATEGORIES
}

/// Look up a benefit field by canonical path.
pub fn field(path: &str) -> Option<&'static BenefitField> {
    benefit_fields().iter().find(|f| f.path == path)
}

/// Look up a record field by verification property name.
pub fn record_field(key: &str) -> Option<&'static RecordField> {
    record_fields().iter().find(|f| f.key == key)
}

/// The benefit fields belonging to `category`, in table order.
pub fn fields_in(category: &str) -> impl Iterator<Item = &'static BenefitField> + '_ {
    benefit_fields().iter().filter(move |f| f.category() == category)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
