//! Dynaform - configuration-driven forms
//!
//! Facade over the workspace crates:
//!
//! * [`schema`] parses and checks JSON/YAML form configurations
//! * [`runtime`] runs a form: values, visibility, validation and submission
//!
//! ```
//! use dynaform::runtime::{handler_fn, FormController};
//!
//! let form = FormController::from_yaml(
//!     "id: ping\nfields:\n  - { type: checkbox, id: ok, label: OK, required: true }\n",
//! )
//! .unwrap();
//! form.set("ok", true).unwrap();
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let outcome = runtime
//!     .block_on(form.validate_and_submit(&handler_fn(|_data| async { Ok(()) })))
//!     .unwrap();
//! assert!(outcome.is_success());
//! ```

pub use dynaform_core as runtime;
pub use dynaform_schema as schema;

pub use dynaform_core::{ConfigLoader, EngineConfig, FormController, SubmitHandler, SubmitOutcome};
pub use dynaform_schema::{parse_and_validate_form_config, FormConfig, SourceFormat};
