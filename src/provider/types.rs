//! Chat completion request and response types
//!
//! Responses are decoded into our own structs rather than `async-openai`'s
//! because those drop the `reasoning_content` field some providers emit.

use crate::message::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    /// Extra body fields passed through to the provider (temperature, max_tokens, ...)
    pub params: Map<String, Value>,
}

impl ChatRequest {
    /// Body fields owned by the request itself
    pub const RESERVED_KEYS: [&'static str; 3] = ["model", "messages", "stream"];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionTokensDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
}

/// Assistant message of a non-streaming response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub index: u32,
    pub message: CompletionMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// A complete (non-streaming) chat completion response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Message of the first choice
    pub fn message(&self) -> Option<&CompletionMessage> {
        self.choices.first().map(|c| &c.message)
    }
}

/// Incremental delta of a streaming response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: ChunkDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// One server-sent chunk of a streaming response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletionChunk {
    /// Delta of the first choice
    pub fn delta(&self) -> Option<&ChunkDelta> {
        self.choices.first().map(|c| &c.delta)
    }

    /// Non-empty text content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.delta()
            .and_then(|d| d.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Non-empty reasoning content of the first choice
    pub fn reasoning(&self) -> Option<&str> {
        self.delta()
            .and_then(|d| d.reasoning_content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Build a content-only chunk
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_delta(ChunkDelta {
            content: Some(content.into()),
            ..Default::default()
        })
    }

    /// Build a reasoning-only chunk
    pub fn thinking(reasoning: impl Into<String>) -> Self {
        Self::with_delta(ChunkDelta {
            reasoning_content: Some(reasoning.into()),
            ..Default::default()
        })
    }

    fn with_delta(delta: ChunkDelta) -> Self {
        Self {
            choices: vec![ChunkChoice {
                delta,
                ..Default::default()
            }],
            ..Default::default()
        }
    }
}
