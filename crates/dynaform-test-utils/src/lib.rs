//! Testing utilities for the Dynaform engine.
//!
//! This crate provides mocks and fakes for [`SubmitHandler`](dynaform_core::SubmitHandler),
//! builders for form configurations, canned form documents, a mock
//! configuration server and assertion helpers.

pub mod assertions;
pub mod builders;
pub mod data_generators;
pub mod mocks;
pub mod server;
pub mod util;

/// Re-export commonly used types for convenience
pub use mockall;

pub use builders::FormConfigBuilder;
pub use mocks::{FailingHandler, GatedHandler, MockSubmitHandler, RecordingHandler};
pub use server::ConfigServer;
pub use util::init_test_tracing;
