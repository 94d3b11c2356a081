//! `LazyLM` smoke-check binary
//!
//! With no arguments, reports whether a backend is configured. With
//! arguments, treats them as a problem statement and prints steps until
//! the session completes or the step limit is reached. Setting
//! `LAZY_LM_SYSTEM_PROMPT=1` sends the one-step system prompt as well.

use lazy_lm::lazy::prompt::LAZY_SYSTEM_PROMPT;
use lazy_lm::llm::{LlmConfig, ModelRegistry};
use lazy_lm::{LazyEvaluationClient, StepOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_MAX_STEPS: usize = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazy_lm=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let llm_config = LlmConfig::from_env();
    let registry = ModelRegistry::new(&llm_config);
    let llm = registry.resolve(None)?;

    tracing::info!(
        models = ?registry.available_models(),
        default = %registry.default_model_id(),
        "LLM registry initialized"
    );

    let problem = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if problem.trim().is_empty() {
        println!("LazyEvaluationClient ready (model: {})", llm.model_id());
        return Ok(());
    }

    let max_steps = std::env::var("LAZY_LM_MAX_STEPS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_MAX_STEPS);

    let mut client = LazyEvaluationClient::with_problem(llm, problem);
    if std::env::var("LAZY_LM_SYSTEM_PROMPT").is_ok_and(|v| v == "1") {
        client = client.with_system_prompt(LAZY_SYSTEM_PROMPT);
    }
    for _ in 0..max_steps {
        match client.next_step().await? {
            StepOutcome::Advanced(step) => {
                println!("Step {}: {}", step.step_number, step.step_content);
                if step.is_complete {
                    break;
                }
            }
            StepOutcome::AlreadyComplete(_) => break,
        }
    }

    if !client.is_complete() {
        tracing::warn!(max_steps, "Step limit reached before completion");
    }

    Ok(())
}
