//! Prompt construction and output budgets

/// Output budget for producing one step
pub const NEXT_STEP_MAX_TOKENS: u32 = 300;

/// Output budget for answering a side question
pub const QUESTION_MAX_TOKENS: u32 = 200;

/// Optional system prompt that keeps the model to one step per reply.
/// Not sent unless the host opts in with `with_system_prompt`.
pub const LAZY_SYSTEM_PROMPT: &str = r"You are a helpful assistant that solves problems one step at a time.
Each time you are asked, give the requested step and only that step. Never give more than one step.
When the problem is solved, state the final answer and say so explicitly.";

/// Prompt requesting step `step_number` (1-indexed) of `problem`
pub fn next_step_prompt(problem: &str, step_number: usize) -> String {
    format!("Solve this step-by-step: {problem}\nCurrent step: {step_number}")
}

/// Prompt asking `question` against an already rendered context
pub fn question_prompt(context: &str, question: &str) -> String {
    format!("{context}\nQuestion: {question}")
}
