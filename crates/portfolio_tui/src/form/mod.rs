//! Declarative form system for the contact page.
//!
//! Split into the same three concerns as the rest of the UI:
//! - [`field`]: field metadata (`FormField`, `FieldKind`)
//! - [`schema`]: the ordered field collection (`FormSchema`)
//! - [`state`]: mutable editing state + validation results (`FormState`)
//!
//! Validation rules themselves live in `portfolio_core`; the form system
//! only dispatches to them and records the outcome.

pub mod field;
pub mod schema;
pub mod state;

pub use field::{FieldKind, FormField};
pub use schema::{contact_schema, FormSchema};
pub use state::FormState;
