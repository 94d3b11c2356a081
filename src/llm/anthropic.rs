//! Anthropic Claude provider implementation

use super::types::{ContentBlock, LlmMessage, LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic model variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnthropicModel {
    Claude4Sonnet,
    Claude35Sonnet,
    Claude35Haiku,
}

impl AnthropicModel {
    pub fn api_name(self) -> &'static str {
        match self {
            AnthropicModel::Claude4Sonnet => "claude-sonnet-4-20250514",
            AnthropicModel::Claude35Sonnet => "claude-3-5-sonnet-20241022",
            AnthropicModel::Claude35Haiku => "claude-3-5-haiku-20241022",
        }
    }

    pub fn context_window(self) -> usize {
        200_000
    }

    pub fn model_id(self) -> &'static str {
        match self {
            AnthropicModel::Claude4Sonnet => "claude-4-sonnet",
            AnthropicModel::Claude35Sonnet => "claude-3.5-sonnet",
            AnthropicModel::Claude35Haiku => "claude-3.5-haiku",
        }
    }
}

/// Anthropic service implementation
pub struct AnthropicService {
    client: Client,
    api_key: String,
    model: AnthropicModel,
    base_url: String,
}

impl AnthropicService {
    pub fn new(
        api_key: String,
        model: AnthropicModel,
        gateway: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: endpoint(gateway),
        })
    }

    fn translate_request(&self, request: &LlmRequest) -> AnthropicRequest {
        let system = if request.system.is_empty() {
            None
        } else {
            Some(
                request
                    .system
                    .iter()
                    .map(|s| AnthropicSystemBlock {
                        r#type: "text".to_string(),
                        text: s.text.clone(),
                    })
                    .collect(),
            )
        };

        AnthropicRequest {
            model: self.model.api_name().to_string(),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system,
            messages: request.messages.iter().map(translate_message).collect(),
        }
    }
}

fn endpoint(gateway: Option<&str>) -> String {
    match gateway {
        Some(gw) => format!("{}/_/gateway/anthropic/v1/messages", gw.trim_end_matches('/')),
        None => API_URL.to_string(),
    }
}

fn translate_message(msg: &LlmMessage) -> AnthropicMessage {
    let content = msg
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Text { text } => AnthropicRequestBlock {
                r#type: "text".to_string(),
                text: text.clone(),
            },
        })
        .collect();

    AnthropicMessage {
        role: "user".to_string(),
        content,
    }
}

fn normalize_response(resp: AnthropicResponse) -> LlmResponse {
    // Only text blocks carry step content; anything else is dropped.
    let content = resp
        .content
        .into_iter()
        .filter_map(|block| match block {
            AnthropicContentBlock::Text { text } => Some(ContentBlock::Text { text }),
            AnthropicContentBlock::Other => None,
        })
        .collect();

    LlmResponse {
        content,
        usage: Usage {
            input_tokens: resp.usage.input_tokens,
            output_tokens: resp.usage.output_tokens,
        },
    }
}

fn parse_response(body: &str) -> Result<LlmResponse, LlmError> {
    let response: AnthropicResponse = serde_json::from_str(body).map_err(|e| {
        LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
    })?;
    Ok(normalize_response(response))
}

fn classify_error(status: reqwest::StatusCode, body: &str) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::auth(format!("Authentication failed: {body}")),
        429 => {
            let mut err = LlmError::rate_limit(format!("Rate limited: {body}"));
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(retry_after) = parsed
                    .get("error")
                    .and_then(|e| e.get("retry_after"))
                    .and_then(serde_json::Value::as_f64)
                {
                    // Negative, NaN or overflowing values are ignored
                    if let Ok(delay) = Duration::try_from_secs_f64(retry_after) {
                        err = err.with_retry_after(delay);
                    }
                }
            }
            err
        }
        400 => LlmError::invalid_request(format!("Invalid request: {body}")),
        500..=599 => LlmError::server_error(format!("Server error: {body}")),
        _ => LlmError::unknown(format!("HTTP {status}: {body}")),
    }
}

#[async_trait]
impl LlmService for AnthropicService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let anthropic_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        parse_response(&body)
    }

    fn model_id(&self) -> &str {
        self.model.model_id()
    }

    fn context_window(&self) -> usize {
        self.model.context_window()
    }
}

// Anthropic API types

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<Vec<AnthropicSystemBlock>>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicSystemBlock {
    r#type: String,
    text: String,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: Vec<AnthropicRequestBlock>,
}

#[derive(Debug, Serialize)]
struct AnthropicRequestBlock {
    r#type: String,
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AnthropicContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u64,
    output_tokens: u64,
}
