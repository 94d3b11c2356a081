//! Session record for one problem-solving attempt
//!
//! All mutation goes through [`LazyState::record_step`], which is only
//! called once a backend response is in hand. That keeps the invariants
//! (`steps.len() == current_step`, `is_complete` never reverting) in one place.

use serde::Serialize;
use std::fmt::Write as _;

/// Phrases that mark a step as the end of the solution (matched case-insensitively)
pub const COMPLETION_PHRASES: [&str; 2] = ["final answer", "solution complete"];

/// Whether a step's text carries a completion signal.
///
/// This is a substring match, so phrasing like "not yet the final answer"
/// also counts.
pub fn is_completion_signal(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMPLETION_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LazyState {
    problem: String,
    steps: Vec<String>,
    current_step: usize,
    is_complete: bool,
}

impl LazyState {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
            ..Self::default()
        }
    }

    /// An empty problem means no session has been started.
    pub fn is_initialized(&self) -> bool {
        !self.problem.is_empty()
    }

    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Most recently produced step, if any
    pub fn latest_step(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    /// 1-indexed number of the step the next advance will request
    pub fn next_step_number(&self) -> usize {
        self.current_step + 1
    }

    /// Append a produced step and return its 1-indexed number.
    pub(crate) fn record_step(&mut self, step: String) -> usize {
        if is_completion_signal(&step) {
            self.is_complete = true;
        }
        self.steps.push(step);
        self.current_step += 1;
        self.current_step
    }

    /// Problem statement followed by every step so far, numbered from 1.
    pub fn question_context(&self) -> String {
        let mut context = format!("Problem: {}\nSteps taken:\n", self.problem);
        for (i, step) in self.steps.iter().enumerate() {
            let _ = writeln!(context, "Step {}: {}", i + 1, step);
        }
        context
    }
}
