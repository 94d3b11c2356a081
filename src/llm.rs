//! Completion backend abstraction
//!
//! The lazy client only needs one capability from a model: turn a prompt
//! into text within a token budget. Providers implement [`LlmService`];
//! everything else in the crate talks to `Arc<dyn LlmService>`.

mod anthropic;
mod error;
mod models;
mod registry;
mod types;

pub use anthropic::{AnthropicModel, AnthropicService};
pub use error::{LlmError, LlmErrorKind};
pub use models::{all_models, ModelDef, Provider};
pub use registry::{ConfigError, LlmConfig, ModelRegistry};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;

    /// Get the context window size in tokens
    fn context_window(&self) -> usize;
}

/// Logging wrapper for completion services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    max_tokens = request.max_tokens,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn context_window(&self) -> usize {
        self.inner.context_window()
    }
}
