//! Errors returned by session operations

use crate::llm::LlmError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LazyError {
    /// An operation ran before `initialize_problem` set a non-empty problem
    #[error("Problem not initialized, call initialize_problem first")]
    Uninitialized,
    /// The completion backend failed; the session is unchanged
    #[error(transparent)]
    Backend(#[from] LlmError),
}

impl LazyError {
    pub fn is_retryable(&self) -> bool {
        match self {
            LazyError::Uninitialized => false,
            LazyError::Backend(e) => e.kind.is_retryable(),
        }
    }
}
