use dynaform_schema::{
    parse_and_validate_form_config, FormConfig, OutputFormat, SourceFormat,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::condition::{visibility_map, ConditionEvaluator, DefaultConditionEvaluator};
use crate::domain::state::FieldStateStore;
use crate::domain::submission::{invoke_handler, SubmissionStatus, SubmitHandler, SubmitOutcome};
use crate::domain::validation::FormValidator;
use crate::error::FormError;
use crate::types::{FieldErrors, FormData};

/// Host-facing handle to one form instance.
///
/// Cloning is cheap and every clone sees the same state. Locks are never held
/// across the submit handler's `.await`.
#[derive(Clone)]
pub struct FormController {
    config: Arc<FormConfig>,
    state: Arc<RwLock<FieldStateStore>>,
    evaluator: Arc<dyn ConditionEvaluator>,
    validator: FormValidator,
}

impl FormController {
    /// Create a controller for an already-parsed configuration
    pub fn new(config: FormConfig) -> Self {
        Self::with_evaluator(Arc::new(config), Arc::new(DefaultConditionEvaluator))
    }

    /// Create a controller using a custom condition evaluator
    pub fn with_evaluator(config: Arc<FormConfig>, evaluator: Arc<dyn ConditionEvaluator>) -> Self {
        let state = FieldStateStore::new(&config);
        Self {
            validator: FormValidator::new(evaluator.clone()),
            config,
            state: Arc::new(RwLock::new(state)),
            evaluator,
        }
    }

    /// Parse, validate and wrap a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(Self::new(parse_and_validate_form_config(json, SourceFormat::Json)?))
    }

    /// Parse, validate and wrap a YAML configuration
    pub fn from_yaml(yaml: &str) -> Result<Self, FormError> {
        Ok(Self::new(parse_and_validate_form_config(yaml, SourceFormat::Yaml)?))
    }

    /// The form configuration
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Snapshot of all live values
    pub fn values(&self) -> FormData {
        self.state.read().values().clone()
    }

    /// Value at a hierarchical path
    pub fn value(&self, path: &str) -> Option<Value> {
        self.state.read().get(path).cloned()
    }

    /// Set the value at a hierarchical path
    pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<(), FormError> {
        self.state.write().set(path, value.into())
    }

    /// Append an item to a list field, returning its index
    pub fn add_list_item(&self, path: &str) -> Result<usize, FormError> {
        self.state.write().add_list_item(&self.config, path)
    }

    /// Remove an item from a list field
    pub fn remove_list_item(&self, path: &str, index: usize) -> Result<Value, FormError> {
        self.state.write().remove_list_item(&self.config, path, index)
    }

    /// Current validation errors
    pub fn errors(&self) -> FieldErrors {
        self.state.read().errors().clone()
    }

    /// Validation messages for one path
    pub fn field_errors(&self, path: &str) -> Vec<String> {
        self.state.read().field_errors(path).to_vec()
    }

    /// Visibility of every field, keyed by hierarchical path
    pub fn visibility(&self) -> BTreeMap<String, bool> {
        let state = self.state.read();
        visibility_map(self.evaluator.as_ref(), &self.config, state.values())
    }

    /// Whether the field at `path` is currently shown; unknown paths are not
    pub fn is_visible(&self, path: &str) -> bool {
        self.visibility().get(path).copied().unwrap_or(false)
    }

    /// Validate current values, store the errors and return them
    pub fn revalidate(&self) -> FieldErrors {
        let mut state = self.state.write();
        let errors = self.validator.validate(&self.config, state.values());
        state.set_errors(errors.clone());
        errors
    }

    /// Current submission status
    pub fn status(&self) -> SubmissionStatus {
        self.state.read().status()
    }

    /// Whether a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.status() == SubmissionStatus::Submitting
    }

    /// Whether the most recent submission succeeded
    pub fn is_success(&self) -> bool {
        self.status() == SubmissionStatus::Success
    }

    /// Message of the most recent submission fault
    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error().map(str::to_string)
    }

    /// Restore initial values and clear errors and status
    pub fn reset(&self) -> Result<(), FormError> {
        self.state.write().reset(&self.config)?;
        info!(form = %self.config.id, "Form reset");
        Ok(())
    }

    /// Submit current values to `handler` without validating them.
    ///
    /// A handler fault is reported as [`SubmitOutcome::Failed`]; `Err` is
    /// only returned when the submission could not start.
    /// Dropping the returned future before it completes records the
    /// submission as failed with [`CANCELLED_MESSAGE`].
    pub async fn submit(&self, handler: &dyn SubmitHandler) -> Result<SubmitOutcome, FormError> {
        let data = {
            let mut state = self.state.write();
            if let Err(e) = state.begin_submission() {
                warn!(form = %self.config.id, error = %e, "Submission rejected");
                return Err(e);
            }
            state.values().clone()
        };
        let in_flight = InFlight {
            state: &self.state,
            form_id: &self.config.id,
            armed: true,
        };
        debug!(form = %self.config.id, "Submitting form");

        let result = invoke_handler(handler, &self.config.id, &data).await;

        in_flight.finish(result.clone())?;
        Ok(match result {
            Ok(()) => SubmitOutcome::Success,
            Err(message) => SubmitOutcome::Failed(message),
        })
    }

    /// Validate first; submit only when no visible field has an error.
    ///
    /// Errors are written to the form either way, and the handler is not
    /// called when validation fails.
    pub async fn validate_and_submit(
        &self,
        handler: &dyn SubmitHandler,
    ) -> Result<SubmitOutcome, FormError> {
        if self.is_submitting() {
            warn!(form = %self.config.id, "Submission rejected");
            return Err(FormError::AlreadySubmitting);
        }

        let errors = self.revalidate();
        if !errors.is_empty() {
            info!(form = %self.config.id, invalid = errors.len(), "Submission blocked by validation");
            return Ok(SubmitOutcome::Invalid(errors));
        }

        self.submit(handler).await
    }

    /// Render current values in the form's output format
    pub fn output(&self) -> Result<String, FormError> {
        let values = self.values();
        let rendered = match self.config.output_format {
            OutputFormat::Json => serde_json::to_string_pretty(&values)?,
            OutputFormat::Yaml => serde_yaml::to_string(&values)?,
        };
        Ok(rendered)
    }
}

/// Message recorded when a submission future is dropped before the handler returns
pub const CANCELLED_MESSAGE: &str = "submission cancelled";

/// Holds a running submission. Dropping it before [`InFlight::finish`]
/// (the caller dropped the future, or the handler panicked) records the
/// submission as failed so the form never stays `Submitting`.
struct InFlight<'a> {
    state: &'a RwLock<FieldStateStore>,
    form_id: &'a str,
    armed: bool,
}

impl InFlight<'_> {
    fn finish(mut self, result: Result<(), String>) -> Result<(), FormError> {
        self.armed = false;
        self.state.write().finish_submission(result)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.write();
        if state.status() == SubmissionStatus::Submitting {
            warn!(form = self.form_id, "Submission dropped before the handler finished");
            let _ = state.finish_submission(Err(CANCELLED_MESSAGE.to_string()));
        }
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("form", &self.config.id)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::handler_fn;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::always;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    mock! {
        Handler {}

        #[async_trait]
        impl SubmitHandler for Handler {
            async fn submit(&self, data: &FormData) -> anyhow::Result<()>;
        }
    }

    const NEWSLETTER: &str = r#"{
        "id": "newsletter",
        "fields": [
            { "type": "text", "id": "name", "label": "Name", "required": true },
            {
                "type": "checkbox",
                "id": "subscribe",
                "label": "Subscribe",
                "conditions": [ { "field": "name", "operator": "!=", "value": "" } ]
            }
        ]
    }"#;

    fn newsletter() -> FormController {
        FormController::from_json(NEWSLETTER).unwrap()
    }

    #[tokio::test]
    async fn test_newsletter_scenario() {
        let form = newsletter();
        assert_eq!(Value::Object(form.values()), json!({ "name": "", "subscribe": false }));
        assert!(!form.is_visible("subscribe"));

        let mut handler = MockHandler::new();
        handler.expect_submit().never();
        let outcome = form.validate_and_submit(&handler).await.unwrap();
        match outcome {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(errors.get("name"), &["required".to_string()]);
            }
            other => panic!("Expected Invalid outcome, got {:?}", other),
        }
        assert_eq!(form.field_errors("name"), vec!["required".to_string()]);
        assert_eq!(form.status(), SubmissionStatus::Idle);

        form.set("name", "Ada").unwrap();
        assert!(form.is_visible("subscribe"));

        let mut handler = MockHandler::new();
        handler
            .expect_submit()
            .withf(|data| data.get("name") == Some(&json!("Ada")))
            .times(1)
            .returning(|_| Ok(()));
        let outcome = form.validate_and_submit(&handler).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Success);
        assert!(form.is_success());
        assert!(!form.is_submitting());
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_fault_is_recorded() {
        let form = newsletter();
        let mut handler = MockHandler::new();
        handler
            .expect_submit()
            .with(always())
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("service unavailable")));

        let outcome = form.submit(&handler).await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Failed("service unavailable".to_string()));
        assert_eq!(form.status(), SubmissionStatus::Failed);
        assert!(!form.is_success());
        assert!(!form.is_submitting());
        assert_eq!(form.last_error().as_deref(), Some("service unavailable"));

        form.reset().unwrap();
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert!(form.last_error().is_none());
    }

    #[tokio::test]
    async fn test_submit_does_not_gate_on_validation() {
        let form = newsletter();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let handler = handler_fn(move |_data| {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        let outcome = form.submit(&handler).await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_rejected() {
        let form = newsletter();
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let handler = {
            let started = started.clone();
            let release = release.clone();
            Arc::new(handler_fn(move |_data| {
                let started = started.clone();
                let release = release.clone();
                async move {
                    started.notify_one();
                    release.notified().await;
                    Ok(())
                }
            }))
        };

        let background = {
            let form = form.clone();
            let handler = handler.clone();
            tokio::spawn(async move { form.submit(handler.as_ref()).await })
        };

        started.notified().await;
        assert!(form.is_submitting());
        assert!(matches!(
            form.submit(handler.as_ref()).await,
            Err(FormError::AlreadySubmitting)
        ));
        assert!(matches!(form.reset(), Err(FormError::AlreadySubmitting)));

        release.notify_one();
        let outcome = background.await.unwrap().unwrap();
        assert_eq!(outcome, SubmitOutcome::Success);
        assert!(form.is_success());
    }

    #[tokio::test]
    async fn test_dropped_submission_does_not_stay_submitting() {
        let form = newsletter();
        let slow = handler_fn(|_data| async {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Ok(())
        });

        let timed_out =
            tokio::time::timeout(std::time::Duration::from_millis(50), form.submit(&slow)).await;
        assert!(timed_out.is_err());

        assert!(!form.is_submitting());
        assert_eq!(form.status(), SubmissionStatus::Failed);
        assert_eq!(form.last_error().as_deref(), Some(CANCELLED_MESSAGE));

        form.reset().unwrap();
        assert_eq!(form.status(), SubmissionStatus::Idle);

        let quick = handler_fn(|_data| async { Ok(()) });
        assert!(form.submit(&quick).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_panicking_handler_does_not_stay_submitting() {
        let form = newsletter();
        let background = {
            let form = form.clone();
            tokio::spawn(async move {
                let handler = handler_fn(|data: FormData| async move {
                    assert!(data.is_empty(), "handler blew up");
                    Ok(())
                });
                form.submit(&handler).await
            })
        };

        assert!(background.await.is_err());
        assert_eq!(form.status(), SubmissionStatus::Failed);
        form.reset().unwrap();
    }

    #[test]
    fn test_clones_share_state() {
        let form = newsletter();
        let other = form.clone();
        other.set("name", json!("Grace")).unwrap();
        assert_eq!(form.value("name"), Some(json!("Grace")));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let form = newsletter();
        let initial = form.values();
        form.set("name", "Ada").unwrap();
        form.revalidate();
        form.reset().unwrap();
        assert_eq!(form.values(), initial);
        assert!(form.errors().is_empty());
        form.reset().unwrap();
        assert_eq!(form.values(), initial);
    }

    #[test]
    fn test_list_operations() {
        let form = FormController::from_json(
            r#"{
                "id": "team",
                "fields": [
                    {
                        "type": "list",
                        "id": "members",
                        "label": "Members",
                        "maxItems": 2,
                        "fields": [ { "type": "text", "id": "name", "label": "Name", "required": true } ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(form.value("members"), Some(json!([])));
        assert_eq!(form.add_list_item("members").unwrap(), 0);
        assert_eq!(form.add_list_item("members").unwrap(), 1);
        assert!(matches!(form.add_list_item("members"), Err(FormError::ListBounds { .. })));

        form.set("members.0.name", "Ada").unwrap();
        let errors = form.revalidate();
        assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["members.1.name"]);

        form.remove_list_item("members", 1).unwrap();
        assert!(form.errors().is_empty());
        assert!(form.revalidate().is_empty());
    }

    #[test]
    fn test_output_formats() {
        let form = newsletter();
        form.set("name", "Ada").unwrap();
        let json_out = form.output().unwrap();
        let parsed: Value = serde_json::from_str(&json_out).unwrap();
        assert_eq!(parsed, json!({ "name": "Ada", "subscribe": false }));

        let mut config = form.config().clone();
        config.output_format = OutputFormat::Yaml;
        let form = FormController::new(config);
        form.set("name", "Ada").unwrap();
        let yaml_out = form.output().unwrap();
        assert!(yaml_out.contains("name: Ada"));
        assert!(yaml_out.contains("subscribe: false"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = FormController::from_json(
            r#"{ "id": "x", "fields": [ { "type": "text", "id": "a", "label": "A",
                 "conditions": [ { "field": "b", "operator": "==", "value": 1 } ] } ] }"#,
        );
        assert!(matches!(result, Err(FormError::Schema(_))));
    }
}
