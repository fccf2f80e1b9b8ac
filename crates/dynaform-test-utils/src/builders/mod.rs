//! Builders for form configurations used in tests.
//!
//! Field helpers return plain [`FormField`](dynaform_schema::FormField)
//! values so they can be tweaked before being added to a form.

mod form;

// Re-export all builders for easy access
pub use form::*;
