//! Centralized model definitions
//!
//! Adding a model means adding one entry to [`all_models`].

use super::anthropic::{AnthropicModel, AnthropicService};
use super::{LlmError, LlmService};
use std::sync::Arc;
use std::time::Duration;

/// Backend provider enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
}

impl Provider {
    /// Environment variable holding this provider's API key
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Factory signature: api key, optional gateway, request timeout
pub type ModelFactory = fn(&str, Option<&str>, Duration) -> Result<Arc<dyn LlmService>, LlmError>;

/// Model definition with metadata
#[derive(Debug, Clone)]
pub struct ModelDef {
    /// User-facing model ID (e.g., "claude-3.5-sonnet")
    pub id: &'static str,
    pub provider: Provider,
    /// Human-readable description
    pub description: &'static str,
    /// Context window size in tokens
    pub context_window: usize,
    /// Factory function to create the service
    pub factory: ModelFactory,
}

fn anthropic(
    model: AnthropicModel,
    api_key: &str,
    gateway: Option<&str>,
    timeout: Duration,
) -> Result<Arc<dyn LlmService>, LlmError> {
    // Accept any non-empty key (including "implicit" for gateway mode)
    if api_key.is_empty() {
        return Err(LlmError::auth(format!(
            "{} requires ANTHROPIC_API_KEY or gateway",
            model.model_id()
        )));
    }
    Ok(Arc::new(AnthropicService::new(
        api_key.to_string(),
        model,
        gateway,
        timeout,
    )?))
}

/// Get all available model definitions
pub fn all_models() -> &'static [ModelDef] {
    &[
        ModelDef {
            id: "claude-3.5-sonnet",
            provider: Provider::Anthropic,
            description: "Claude 3.5 Sonnet (balanced, default)",
            context_window: 200_000,
            factory: |api_key, gateway, timeout| {
                anthropic(AnthropicModel::Claude35Sonnet, api_key, gateway, timeout)
            },
        },
        ModelDef {
            id: "claude-3.5-haiku",
            provider: Provider::Anthropic,
            description: "Claude 3.5 Haiku (fast, efficient)",
            context_window: 200_000,
            factory: |api_key, gateway, timeout| {
                anthropic(AnthropicModel::Claude35Haiku, api_key, gateway, timeout)
            },
        },
        ModelDef {
            id: "claude-4-sonnet",
            provider: Provider::Anthropic,
            description: "Claude Sonnet 4 (most capable)",
            context_window: 200_000,
            factory: |api_key, gateway, timeout| {
                anthropic(AnthropicModel::Claude4Sonnet, api_key, gateway, timeout)
            },
        },
    ]
}
