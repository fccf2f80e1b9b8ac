//! Submit handler doubles.

use anyhow::anyhow;
use async_trait::async_trait;
use dynaform_core::{FormData, SubmitHandler};
use mockall::mock;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

mock! {
    /// Mockall double for [`SubmitHandler`]
    pub SubmitHandler {}

    #[async_trait]
    impl SubmitHandler for SubmitHandler {
        async fn submit(&self, data: &FormData) -> anyhow::Result<()>;
    }
}

/// Handler that accepts every submission and keeps a copy of it
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    submissions: Arc<Mutex<Vec<FormData>>>,
}

impl RecordingHandler {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every payload received so far, oldest first
    pub fn submissions(&self) -> Vec<FormData> {
        self.submissions.lock().clone()
    }

    /// The most recent payload
    pub fn last(&self) -> Option<FormData> {
        self.submissions.lock().last().cloned()
    }

    /// Number of submissions received
    pub fn count(&self) -> usize {
        self.submissions.lock().len()
    }
}

#[async_trait]
impl SubmitHandler for RecordingHandler {
    async fn submit(&self, data: &FormData) -> anyhow::Result<()> {
        self.submissions.lock().push(data.clone());
        Ok(())
    }
}

/// Handler that rejects every submission with a fixed message
#[derive(Debug, Clone)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Fail with `message`
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl SubmitHandler for FailingHandler {
    async fn submit(&self, _data: &FormData) -> anyhow::Result<()> {
        Err(anyhow!(self.message.clone()))
    }
}

/// Handler that blocks until released, for exercising in-flight submissions.
///
/// ```
/// use dynaform_test_utils::GatedHandler;
///
/// let gate = GatedHandler::new();
/// gate.release();
/// ```
#[derive(Debug, Clone, Default)]
pub struct GatedHandler {
    started: Arc<Notify>,
    release: Arc<Notify>,
    recorder: RecordingHandler,
}

impl GatedHandler {
    /// Create a closed gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until a submission has reached the handler
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let the waiting submission finish
    pub fn release(&self) {
        self.release.notify_one();
    }

    /// Payloads that made it through the gate
    pub fn recorder(&self) -> &RecordingHandler {
        &self.recorder
    }
}

#[async_trait]
impl SubmitHandler for GatedHandler {
    async fn submit(&self, data: &FormData) -> anyhow::Result<()> {
        self.started.notify_one();
        self.release.notified().await;
        self.recorder.submit(data).await
    }
}
