//! Provider configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported OpenAI-compatible provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAI,
    DeepSeek,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::OpenAI, Provider::DeepSeek];

    /// Section name in the settings file
    pub fn section(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::DeepSeek => "deepseek",
        }
    }

    /// Display name for the provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::DeepSeek => "DeepSeek",
        }
    }

    /// API base URL used when the settings give none
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::DeepSeek => "https://api.deepseek.com/v1",
        }
    }

    /// System prompt used when the caller gives none
    pub fn default_system_prompt(&self) -> &'static str {
        match self {
            Provider::OpenAI => "你是乐于助人的AI,请使用中文回答问题",
            Provider::DeepSeek => "你是DeepSeek AI助手，请使用中文回答问题",
        }
    }

    /// Whether responses carry a `reasoning_content` channel
    pub fn supports_reasoning(&self) -> bool {
        matches!(self, Provider::DeepSeek)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "deepseek" => Ok(Provider::DeepSeek),
            other => Err(format!(
                "unknown provider '{}' (expected 'openai' or 'deepseek')",
                other
            )),
        }
    }
}
