use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use tracing::{error, info};

use crate::error::FormError;
use crate::types::{FieldErrors, FormData};

/// Host collaborator that receives collected form data.
///
/// Any error it returns is treated as a submission fault: logged, recorded on
/// the form and reported as [`SubmitOutcome::Failed`].
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    /// Deliver the form data
    async fn submit(&self, data: &FormData) -> anyhow::Result<()>;
}

/// Adapter turning an async closure into a [`SubmitHandler`]
pub struct FnHandler<F> {
    f: F,
}

/// Wrap an async closure as a submit handler
///
/// ```
/// use dynaform_core::handler_fn;
///
/// let handler = handler_fn(|data| async move {
///     println!("submitted {} fields", data.len());
///     Ok(())
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut>(f: F) -> FnHandler<F>
where
    F: Fn(FormData) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Fut> SubmitHandler for FnHandler<F>
where
    F: Fn(FormData) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn submit(&self, data: &FormData) -> anyhow::Result<()> {
        (self.f)(data.clone()).await
    }
}

/// Lifecycle of a form submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Never submitted, or reset since
    #[default]
    Idle,
    /// Handler is running
    Submitting,
    /// Handler completed
    Success,
    /// Handler faulted
    Failed,
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The handler accepted the data
    Success,
    /// The handler faulted with this message
    Failed(String),
    /// Validation failed; the handler was not called
    Invalid(FieldErrors),
}

impl SubmitOutcome {
    /// Whether the handler accepted the data
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success)
    }
}

/// Move the submission status to `next`, rejecting transitions the lifecycle
/// does not allow. A second submit while one is running is reported as
/// [`FormError::AlreadySubmitting`].
pub fn transition(
    current: SubmissionStatus,
    next: SubmissionStatus,
) -> Result<SubmissionStatus, FormError> {
    use SubmissionStatus::*;

    if current == Submitting && next == Submitting {
        return Err(FormError::AlreadySubmitting);
    }

    let allowed = matches!(
        (current, next),
        (Idle | Success | Failed, Submitting)
            | (Submitting, Success)
            | (Submitting, Failed)
            | (Idle | Success | Failed, Idle)
    );
    if !allowed {
        return Err(FormError::InvalidTransition {
            from: current,
            to: next,
        });
    }
    Ok(next)
}

/// Run the handler and turn a fault into its message.
///
/// Faults never propagate: the message is logged and returned as `Err` for
/// the caller to record.
pub async fn invoke_handler(
    handler: &dyn SubmitHandler,
    form_id: &str,
    data: &FormData,
) -> Result<(), String> {
    match handler.submit(data).await {
        Ok(()) => {
            info!(form = form_id, fields = data.len(), "Form submitted");
            Ok(())
        }
        Err(e) => {
            let message = format!("{:#}", e);
            error!(form = form_id, error = %message, "Form submission failed");
            Err(message)
        }
    }
}
