//! Mocks and fakes for the host collaborators of a form.

mod handlers;

pub use handlers::*;
