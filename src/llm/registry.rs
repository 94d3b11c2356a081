//! Host-side configuration and the registry of available backends

use super::{all_models, LlmService, LoggingService, ModelDef, Provider};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MODEL: &str = "claude-3.5-sonnet";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for completion backends
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub anthropic_api_key: Option<String>,
    /// Gateway URL; when set the gateway handles authentication
    pub gateway: Option<String>,
    /// Default model ID
    pub default_model: Option<String>,
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            gateway: None,
            default_model: None,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable timeouts fall back to the default.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let request_timeout = lookup("LAZY_LM_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Self {
            anthropic_api_key: lookup(Provider::Anthropic.api_key_env_var()),
            gateway: lookup("LLM_GATEWAY"),
            default_model: lookup("LAZY_LM_MODEL"),
            request_timeout,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No models available. Set ANTHROPIC_API_KEY or LLM_GATEWAY.")]
    NoModels,
    #[error("Unknown or unavailable model: {0}")]
    UnknownModel(String),
}

/// Registry of available models
pub struct ModelRegistry {
    services: HashMap<String, Arc<dyn LlmService>>,
    default_model: String,
}

impl ModelRegistry {
    pub fn new(config: &LlmConfig) -> Self {
        let mut services: HashMap<String, Arc<dyn LlmService>> = HashMap::new();

        for model_def in all_models() {
            if let Some(service) = Self::try_create_model(model_def, config) {
                services.insert(model_def.id.to_string(), service);
            }
        }

        let default_model = config
            .default_model
            .clone()
            .filter(|id| services.contains_key(id))
            .or_else(|| {
                if services.contains_key(DEFAULT_MODEL) {
                    Some(DEFAULT_MODEL.to_string())
                } else {
                    let mut ids: Vec<_> = services.keys().cloned().collect();
                    ids.sort();
                    ids.into_iter().next()
                }
            })
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            services,
            default_model,
        }
    }

    fn try_create_model(model_def: &ModelDef, config: &LlmConfig) -> Option<Arc<dyn LlmService>> {
        // Gateway mode uses "implicit" as the key; the gateway authenticates
        let api_key = if config.gateway.is_some() {
            "implicit".to_string()
        } else {
            match model_def.provider {
                Provider::Anthropic => config.anthropic_api_key.as_ref()?,
            }
            .clone()
        };

        if config.gateway.is_none() && api_key.is_empty() {
            return None;
        }

        match (model_def.factory)(&api_key, config.gateway.as_deref(), config.request_timeout) {
            Ok(service) => Some(Arc::new(LoggingService::new(service))),
            Err(e) => {
                tracing::warn!(model = model_def.id, error = %e, "Skipping model");
                None
            }
        }
    }

    /// Get a model by ID
    pub fn get(&self, model_id: &str) -> Option<Arc<dyn LlmService>> {
        self.services.get(model_id).cloned()
    }

    /// Get the default model
    pub fn default(&self) -> Option<Arc<dyn LlmService>> {
        self.get(&self.default_model)
    }

    pub fn default_model_id(&self) -> &str {
        &self.default_model
    }

    /// Resolve an explicit model, or the default when `None`
    pub fn resolve(&self, model_id: Option<&str>) -> Result<Arc<dyn LlmService>, ConfigError> {
        if !self.has_models() {
            return Err(ConfigError::NoModels);
        }
        let id = model_id.unwrap_or(self.default_model.as_str());
        self.get(id)
            .ok_or_else(|| ConfigError::UnknownModel(id.to_string()))
    }

    /// List all available model IDs, sorted
    pub fn available_models(&self) -> Vec<String> {
        let mut models: Vec<_> = self.services.keys().cloned().collect();
        models.sort();
        models
    }

    pub fn has_models(&self) -> bool {
        !self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_api_keys_no_models() {
        let registry = ModelRegistry::new(&LlmConfig::default());
        assert!(registry.available_models().is_empty());
        assert!(registry.default().is_none());
        assert_eq!(registry.resolve(None).err(), Some(ConfigError::NoModels));
    }

    #[test]
    fn test_empty_key_no_models() {
        let config = LlmConfig {
            anthropic_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!ModelRegistry::new(&config).has_models());
    }

    #[test]
    fn test_anthropic_key_registers_all_models() {
        let config = LlmConfig {
            anthropic_api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);

        assert_eq!(registry.available_models().len(), all_models().len());
        assert_eq!(registry.default_model_id(), "claude-3.5-sonnet");
        assert_eq!(registry.resolve(None).unwrap().model_id(), "claude-3.5-sonnet");
    }

    #[test]
    fn test_gateway_enables_models_without_key() {
        let config = LlmConfig {
            gateway: Some("https://example.com".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);
        assert!(registry.get("claude-3.5-haiku").is_some());
    }

    #[test]
    fn test_custom_default_model() {
        let config = LlmConfig {
            anthropic_api_key: Some("test-key".to_string()),
            default_model: Some("claude-3.5-haiku".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);
        assert_eq!(registry.default_model_id(), "claude-3.5-haiku");
    }

    #[test]
    fn test_unknown_default_model_falls_back() {
        let config = LlmConfig {
            anthropic_api_key: Some("test-key".to_string()),
            default_model: Some("gpt-nope".to_string()),
            ..Default::default()
        };
        let registry = ModelRegistry::new(&config);
        assert_eq!(registry.default_model_id(), "claude-3.5-sonnet");
        assert_eq!(
            registry.resolve(Some("gpt-nope")).err(),
            Some(ConfigError::UnknownModel("gpt-nope".to_string()))
        );
    }

    #[test]
    fn test_config_from_vars() {
        let config = LlmConfig::from_vars(|key| match key {
            "ANTHROPIC_API_KEY" => Some("sk-test".to_string()),
            "LAZY_LM_MODEL" => Some("claude-4-sonnet".to_string()),
            "LAZY_LM_TIMEOUT_SECS" => Some(" 30 ".to_string()),
            _ => None,
        });
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.default_model.as_deref(), Some("claude-4-sonnet"));
        assert_eq!(config.gateway, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));

        let config = LlmConfig::from_vars(|key| {
            (key == "LAZY_LM_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
    }
}
