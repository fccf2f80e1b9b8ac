//! Assertion utilities for form tests.
//!
//! Each assertion returns a `Result` so failures can be reported with `?` or
//! unwrapped in the test body.

mod form_state;

pub use form_state::*;
