//! Mock backend for testing
//!
//! Serves queued responses in order and records every request.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// Mock LLM Client
// ============================================================================

pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful plain-text response
    pub fn queue_text(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(LlmResponse::from_text(text)));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmService for MockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn context_window(&self) -> usize {
        8_192
    }
}
