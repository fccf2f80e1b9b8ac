//! Generators for form documents and form data used in tests.

mod forms;

pub use forms::*;
