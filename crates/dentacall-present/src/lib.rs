//! # dentacall-present
//!
//! The read side of the engine. Stored verifications may carry benefits in
//! any schema generation ever written; this crate resolves them through the
//! field dictionary into one field-by-field view, renders that view as a
//! breakdown sheet, and summarizes a practice's history.
//!
//! ```rust,ignore
//! use dentacall_present::{render_sheet, view};
//!
//! let sheet = render_sheet(&view(&stored_verification));
//! println!("{sheet}");
//! ```

pub mod sheet;
pub mod summary;
pub mod view;

pub use sheet::{display_field, money, render_sheet};
pub use summary::{summarize_practice, PracticeSummary, HOURS_SAVED_PER_VERIFICATION};
pub use view::{view, view_document, Captured, CategoryView, FieldView, VerificationView};

// ── Tests ─────────────────────────────────────────────────────────────────────
