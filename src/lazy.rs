//! Lazy step-by-step problem solving
//!
//! A session holds one problem and the trace of steps produced for it.
//! Steps are requested one at a time; side questions can be asked at any
//! point against the trace so far.

mod client;
mod error;
pub mod prompt;
mod state;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    Answer, CompletionNotice, CurrentStep, LazyEvaluationClient, ProblemSummary, StepOutcome,
    StepResult, COMPLETE_MESSAGE,
};
pub use error::LazyError;
pub use state::{is_completion_signal, LazyState, COMPLETION_PHRASES};
