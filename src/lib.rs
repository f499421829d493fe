//! modelcall - a thin client for OpenAI-compatible chat APIs
//!
//! This crate provides:
//! - TOML settings with one section per provider
//! - Single-shot and streaming chat completions (OpenAI, DeepSeek)
//! - Text, raw and text+reasoning output shapes
//! - CLI interface for quick prompts

pub mod chat;
pub mod config;
pub mod message;
pub mod provider;
pub mod telemetry;

pub use chat::{chat, ChatClient, ChatError, ChatOptions, ChatOutput, OutputMode, StreamDelta};
pub use config::{ConfigError, ServiceConfig, Settings};
pub use message::{Message, Role};
pub use provider::{
    ChatCompletion, ChatCompletionChunk, ChatRequest, ChatTransport, Provider, ProviderClient,
    TransportError,
};
pub use telemetry::Telemetry;
