//! OpenAI-compatible provider client
//!
//! Handles single-shot and streaming chat completions.
//! Uses raw HTTP so `reasoning_content` (DeepSeek's reasoning channel)
//! survives decoding; async-openai supplies the endpoint/auth config and the
//! request message types.

use super::types::{ChatCompletion, ChatCompletionChunk, ChatRequest};
use super::Provider;
use crate::config::ServiceConfig;
use crate::message::to_request_messages;
use async_openai::config::{Config, OpenAIConfig};
use async_openai::error::OpenAIError;
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::{future, StreamExt};

/// Stream of decoded response chunks
pub type ChunkStream = BoxStream<'static, Result<ChatCompletionChunk, TransportError>>;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Stream line is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("Failed to build request: {0}")]
    Request(#[from] OpenAIError),
}

/// Something that can answer chat completion requests
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a request and wait for the whole response
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, TransportError>;

    /// Send a request and return the response as incremental chunks
    async fn stream(&self, request: ChatRequest) -> Result<ChunkStream, TransportError>;
}

/// Splits a server-sent event byte stream into `data:` payloads
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Marker payload that ends an OpenAI-style stream
    pub const DONE: &'static str = "[DONE]";

    /// Feed raw bytes, returning every complete `data:` payload.
    ///
    /// Bytes are only decoded once a whole line is buffered, so multi-byte
    /// characters may straddle reads.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Result<String, TransportError>> {
        self.buffer.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = match String::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    payloads.push(Err(TransportError::from(e)));
                    continue;
                }
            };
            let line = line.trim();

            // Blank separators and `:` keep-alive comments
            if line.is_empty() || line.starts_with(':') {
                continue;
            }

            if let Some(data) = line.strip_prefix("data:") {
                payloads.push(Ok(data.trim_start().to_string()));
            }
        }
        payloads
    }
}

/// Decode an SSE byte stream into chat chunks, stopping at `[DONE]`
pub fn decode_sse<S, B, E>(bytes: S) -> ChunkStream
where
    S: futures::Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + 'static,
    E: 'static,
    TransportError: From<E>,
{
    bytes
        .scan(SseDecoder::default(), |decoder, item| {
            let payloads = match item {
                Ok(bytes) => decoder.feed(bytes.as_ref()),
                Err(e) => vec![Err(TransportError::from(e))],
            };
            future::ready(Some(stream::iter(payloads)))
        })
        .flatten()
        .take_while(|item| future::ready(!matches!(item, Ok(data) if data == SseDecoder::DONE)))
        .map(|item| {
            item.and_then(|data| {
                serde_json::from_str::<ChatCompletionChunk>(&data).map_err(<TransportError as From<serde_json::Error>>::from)
            })
        })
        .boxed()
}

/// HTTP client for a single provider endpoint
#[derive(Clone)]
pub struct ProviderClient {
    provider: Provider,
    config: OpenAIConfig,
    http_client: reqwest::Client,
}

impl ProviderClient {
    /// Create a new provider client from the resolved service settings
    pub fn new(provider: Provider, service: &ServiceConfig) -> Result<Self, TransportError> {
        let base_url = service
            .base_url
            .as_deref()
            .unwrap_or(provider.default_base_url())
            .trim_end_matches('/');

        let config = OpenAIConfig::new()
            .with_api_key(&service.api_key)
            .with_api_base(base_url);

        let http_client = reqwest::Client::builder().build()?;

        Ok(Self {
            provider,
            config,
            http_client,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Endpoint requests are posted to
    pub fn endpoint(&self) -> String {
        self.config.url("/chat/completions")
    }

    /// JSON body for a request; passthrough params are merged last
    pub fn request_body(request: &ChatRequest) -> Result<serde_json::Value, TransportError> {
        let messages = to_request_messages(&request.messages)?;

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": messages,
            "stream": request.stream,
        });

        if let Some(obj) = body.as_object_mut() {
            for (key, value) in &request.params {
                obj.insert(key.clone(), value.clone());
            }
        }

        Ok(body)
    }

    async fn send(&self, request: &ChatRequest) -> Result<reqwest::Response, TransportError> {
        let body = Self::request_body(request)?;

        let response = self
            .http_client
            .post(self.endpoint())
            .headers(self.config.headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(target: "llm", provider = %self.provider, error = %e, "Chat request failed");
                TransportError::from(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                target: "llm",
                provider = %self.provider,
                status = %status,
                error = %body,
                "Chat request returned error"
            );
            return Err(TransportError::Api { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatTransport for ProviderClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, TransportError> {
        let response = self.send(&request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn stream(&self, request: ChatRequest) -> Result<ChunkStream, TransportError> {
        let response = self.send(&request).await?;
        Ok(decode_sse(response.bytes_stream()))
    }
}
