//! Session-driving client
//!
//! Owns the completion backend and the current [`LazyState`]. Every
//! operation that needs a problem fails with [`LazyError::Uninitialized`]
//! until `initialize_problem` has run with non-empty text.

use super::prompt::{next_step_prompt, question_prompt, NEXT_STEP_MAX_TOKENS, QUESTION_MAX_TOKENS};
use super::{LazyError, LazyState};
use crate::llm::{LlmRequest, LlmService};
use serde::Serialize;
use std::sync::Arc;

/// Message carried by the sentinel returned once a session is complete
pub const COMPLETE_MESSAGE: &str = "Problem solving is complete";

/// Snapshot returned by `initialize_problem`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemSummary {
    pub problem: String,
    pub current_step: usize,
    pub is_complete: bool,
}

/// Current position in the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentStep {
    pub current_step: usize,
    /// `None` until the first step has been produced
    pub step_content: Option<String>,
    pub is_complete: bool,
}

/// A freshly produced step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    pub step_number: usize,
    pub step_content: String,
    pub is_complete: bool,
}

/// Sentinel for advancing a session that is already complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionNotice {
    pub message: String,
    pub is_complete: bool,
}

impl Default for CompletionNotice {
    fn default() -> Self {
        Self {
            message: COMPLETE_MESSAGE.to_string(),
            is_complete: true,
        }
    }
}

/// Result of `next_step`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepOutcome {
    Advanced(StepResult),
    AlreadyComplete(CompletionNotice),
}

impl StepOutcome {
    pub fn is_complete(&self) -> bool {
        match self {
            StepOutcome::Advanced(step) => step.is_complete,
            StepOutcome::AlreadyComplete(_) => true,
        }
    }

    /// The produced step, or `None` for the completion sentinel
    pub fn step(&self) -> Option<&StepResult> {
        match self {
            StepOutcome::Advanced(step) => Some(step),
            StepOutcome::AlreadyComplete(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub answer: String,
}

pub struct LazyEvaluationClient {
    llm: Arc<dyn LlmService>,
    state: LazyState,
    system_prompt: Option<String>,
}

impl LazyEvaluationClient {
    /// Client with no session; call `initialize_problem` before anything else.
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self {
            llm,
            state: LazyState::default(),
            system_prompt: None,
        }
    }

    /// Client with a session already started for `problem`
    pub fn with_problem(llm: Arc<dyn LlmService>, problem: impl Into<String>) -> Self {
        let mut client = Self::new(llm);
        client.initialize_problem(problem);
        client
    }

    /// Send `prompt` as system content on every backend call
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn state(&self) -> &LazyState {
        &self.state
    }

    pub fn problem(&self) -> &str {
        self.state.problem()
    }

    pub fn steps(&self) -> &[String] {
        self.state.steps()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Start a new session, discarding the previous one entirely.
    pub fn initialize_problem(&mut self, problem: impl Into<String>) -> ProblemSummary {
        self.state = LazyState::new(problem);
        tracing::debug!(problem_len = self.state.problem().len(), "Session initialized");

        ProblemSummary {
            problem: self.state.problem().to_string(),
            current_step: self.state.current_step(),
            is_complete: self.state.is_complete(),
        }
    }

    pub fn current_step(&self) -> Result<CurrentStep, LazyError> {
        let state = self.initialized()?;
        Ok(CurrentStep {
            current_step: state.current_step(),
            step_content: state.latest_step().map(str::to_string),
            is_complete: state.is_complete(),
        })
    }

    /// Request the next step from the backend.
    ///
    /// Once the session is complete this returns the completion sentinel
    /// without calling the backend. On backend failure the session is left
    /// exactly as it was, so the call can simply be repeated.
    pub async fn next_step(&mut self) -> Result<StepOutcome, LazyError> {
        let state = self.initialized()?;
        if state.is_complete() {
            return Ok(StepOutcome::AlreadyComplete(CompletionNotice::default()));
        }

        let step_number = state.next_step_number();
        let request = self.request(
            next_step_prompt(state.problem(), step_number),
            NEXT_STEP_MAX_TOKENS,
        );
        tracing::debug!(step_number, "Requesting next step");

        let response = self.llm.complete(&request).await?;

        let next_step = response.text().trim().to_string();
        let step_number = self.state.record_step(next_step.clone());
        let is_complete = self.state.is_complete();
        if is_complete {
            tracing::info!(steps = step_number, "Session complete");
        }

        Ok(StepOutcome::Advanced(StepResult {
            step_number,
            step_content: next_step,
            is_complete,
        }))
    }

    /// Ask a side question grounded in the problem and every step so far.
    /// Never changes the session.
    pub async fn ask_question(&self, question: &str) -> Result<Answer, LazyError> {
        let state = self.initialized()?;
        let request = self.request(
            question_prompt(&state.question_context(), question),
            QUESTION_MAX_TOKENS,
        );
        tracing::debug!(context_steps = state.steps().len(), "Asking question");

        let response = self.llm.complete(&request).await?;
        Ok(Answer {
            answer: response.text().trim().to_string(),
        })
    }

    fn initialized(&self) -> Result<&LazyState, LazyError> {
        if self.state.is_initialized() {
            Ok(&self.state)
        } else {
            Err(LazyError::Uninitialized)
        }
    }

    fn request(&self, prompt: String, max_tokens: u32) -> LlmRequest {
        let request = LlmRequest::prompt(prompt, max_tokens);
        match &self.system_prompt {
            Some(system) => request.with_system(system.clone()),
            None => request,
        }
    }
}
