//! Common types for backend interactions

use serde::{Deserialize, Serialize};

/// Completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    pub system: Vec<SystemContent>,
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// Single user prompt with an output budget.
    pub fn prompt(text: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: vec![],
            messages: vec![LlmMessage::user(text)],
            max_tokens: Some(max_tokens),
        }
    }

    #[must_use]
    pub fn with_system(mut self, text: impl Into<String>) -> Self {
        self.system.push(SystemContent::new(text));
        self
    }

    /// Text of every message, in order
    pub fn user_text(&self) -> String {
        self.messages
            .iter()
            .map(LlmMessage::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// System prompt content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemContent {
    pub text: String,
}

impl SystemContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// User message; the lazy client never replays assistant turns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub content: Vec<ContentBlock>,
}

impl LlmMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
        }
    }

    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect()
    }
}

/// Content block in a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(s: impl Into<String>) -> Self {
        ContentBlock::Text { text: s.into() }
    }
}

/// Completion response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

impl LlmResponse {
    /// Plain text response, as a test double or simple backend would produce
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            usage: Usage::default(),
        }
    }

    /// Get text content from the response
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
