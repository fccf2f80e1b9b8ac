//! Dynaform Core - runtime for declarative forms
//!
//! This crate turns a [`FormConfig`](dynaform_schema::FormConfig) into a live
//! form: it holds field values, decides which fields are visible, validates
//! visible fields and drives submission through a host-supplied
//! [`SubmitHandler`].
//!
//! ```
//! use dynaform_core::{FormController, SubmitOutcome, handler_fn};
//!
//! # tokio_test::block_on(async {
//! let form = FormController::from_json(r#"{
//!     "id": "contact",
//!     "fields": [ { "type": "text", "id": "name", "label": "Name", "required": true } ]
//! }"#).unwrap();
//!
//! let handler = handler_fn(|_data| async { Ok(()) });
//!
//! let outcome = form.validate_and_submit(&handler).await.unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
//!
//! form.set("name", "Ada").unwrap();
//! assert!(form.validate_and_submit(&handler).await.unwrap().is_success());
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Domain layer - field state, conditions, validation and submission rules
pub mod domain;

/// Application services - the form controller and configuration loader
pub mod application;

/// Core types
pub mod types;

/// Error types
pub mod error;

/// Engine configuration
pub mod config;

pub use application::controller::FormController;
pub use application::loader::ConfigLoader;
pub use config::EngineConfig;
pub use domain::condition::{visibility_map, ConditionEvaluator, DefaultConditionEvaluator, Scope};
pub use domain::state::{default_values, FieldStateStore};
pub use domain::submission::{handler_fn, FnHandler, SubmissionStatus, SubmitHandler, SubmitOutcome};
pub use domain::validation::FormValidator;
pub use error::{FormError, LoadError};
pub use types::{FieldErrors, FormData};
