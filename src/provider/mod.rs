//! LLM Provider layer
//!
//! OpenAI-compatible providers and the transport that talks to them.
//! Supports any API implementing the OpenAI chat completions spec.

mod client;
mod config;
mod types;

pub use client::*;
pub use config::*;
pub use types::*;
