//! Form domain layer
//!
//! Schema-driven form state: value objects, the immutable store and its
//! operations, visibility evaluation, and the flattened row model shared by
//! rendering and input handling.

mod field;
mod form_state;
mod rows;
mod visibility;

pub use field::FieldValue;
pub use form_state::{FormAction, FormValues, ScopeStep};
pub use rows::{build_rows, FormRow, RowKey, RowKind};
