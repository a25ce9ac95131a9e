// ABOUTME: AuditMiddleware - the lifecycle hook that records a subagent's
// ABOUTME: final answer after each model call, sync or async.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use super::{AuditWriter, Response};
use crate::error::AuditError;
use crate::hook::{Hook, HookAction, HookEvent, HookInput};

/// Records final answers for one subagent.
///
/// Both entry points take either a lone response or a `(request, response)`
/// pair, record from the response, and hand it back unchanged.
#[derive(Debug, Clone)]
pub struct AuditMiddleware {
    writer: Arc<AuditWriter>,
}

impl AuditMiddleware {
    /// Create middleware writing under `path` (see [`AuditWriter::new`]).
    pub fn new(
        path: impl Into<PathBuf>,
        subagent: impl Into<String>,
        max_log: usize,
    ) -> Result<Self, AuditError> {
        Ok(Self::with_writer(Arc::new(AuditWriter::new(
            path, subagent, max_log,
        )?)))
    }

    /// Wrap an existing writer.
    pub fn with_writer(writer: Arc<AuditWriter>) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &AuditWriter {
        &self.writer
    }

    /// Record after a model call on the synchronous path.
    pub fn after_model(&self, input: impl Into<HookInput>) -> Result<Response, AuditError> {
        let response = input.into().into_response();
        self.writer.record(&response)?;
        Ok(response)
    }

    /// Record after a model call on the async path.
    ///
    /// Extraction is identical to [`after_model`](Self::after_model); the
    /// file append runs on the blocking pool.
    pub async fn after_model_async(
        &self,
        input: impl Into<HookInput>,
    ) -> Result<Response, AuditError> {
        let response = input.into().into_response();
        let writer = Arc::clone(&self.writer);
        tokio::task::spawn_blocking(move || writer.record(&response).map(|_| response))
            .await
            .map_err(|e| AuditError::Task(e.to_string()))?
    }
}

#[async_trait]
impl Hook for AuditMiddleware {
    fn accepts(&self, event: &HookEvent) -> bool {
        matches!(event, HookEvent::ModelResponse { subagent, .. } if subagent == self.writer.subagent())
    }

    async fn on_event(&self, event: &HookEvent) -> Result<HookAction, anyhow::Error> {
        if let HookEvent::ModelResponse { input, .. } = event {
            self.after_model_async(input.clone()).await?;
        }
        Ok(HookAction::Continue)
    }
}
