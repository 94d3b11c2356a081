//! `LazyLM` - step-at-a-time problem solving against an LLM
//!
//! The host builds a completion backend (see [`llm::ModelRegistry`]) and
//! hands it to a [`LazyEvaluationClient`], which drives one session:
//! initialize a problem, pull steps one by one, and ask questions about
//! the trace along the way.

pub mod lazy;
pub mod llm;

pub use lazy::{LazyError, LazyEvaluationClient, LazyState, StepOutcome};
