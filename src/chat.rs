//! Chat invocation
//!
//! One routine serves every provider: resolve the model and the outgoing
//! messages, send a single request, and reshape the response into the
//! output mode the caller asked for. Streamed fragments are echoed through
//! an optional channel instead of being written to the console directly.

use crate::config::{ConfigError, ServiceConfig, Settings};
use crate::message::Message;
use crate::provider::{
    ChatCompletionChunk, ChatRequest, ChatTransport, ChatCompletion, ChunkStream, Provider,
    ProviderClient, TransportError, Usage,
};
use futures::StreamExt;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Response contained no choices")]
    EmptyResponse,
}

/// Shape of the value returned by a chat call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The decoded provider response (or the list of chunks when streaming)
    Raw,
    /// Only the answer text
    #[default]
    Text,
    /// Answer text plus reasoning text
    Both,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Raw => "json",
            OutputMode::Text => "text",
            OutputMode::Both => "both",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" | "raw" => Ok(OutputMode::Raw),
            "text" => Ok(OutputMode::Text),
            "both" => Ok(OutputMode::Both),
            other => Err(ChatError::InvalidArgument(format!(
                "output mode must be 'json', 'text' or 'both', got '{}'",
                other
            ))),
        }
    }
}

/// Echo events emitted while a streamed response is consumed
#[derive(Debug, Clone, PartialEq)]
pub enum StreamDelta {
    /// A whole chunk (raw mode)
    Chunk(ChatCompletionChunk),
    /// Answer text fragment
    Text(String),
    /// Reasoning text fragment
    Reasoning(String),
    /// Text stream finished
    Done,
}

/// Result of a chat call
#[derive(Debug, Clone, PartialEq)]
pub enum ChatOutput {
    Raw(ChatCompletion),
    Chunks(Vec<ChatCompletionChunk>),
    Text(String),
    Both { content: String, reasoning: String },
}

impl ChatOutput {
    /// Answer text, if this output carries one
    pub fn text(&self) -> Option<&str> {
        match self {
            ChatOutput::Text(text) => Some(text),
            ChatOutput::Both { content, .. } => Some(content),
            _ => None,
        }
    }

    /// `(content, reasoning)` for dual-channel output
    pub fn into_pair(self) -> Option<(String, String)> {
        match self {
            ChatOutput::Both { content, reasoning } => Some((content, reasoning)),
            _ => None,
        }
    }
}

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// User input, used when no history is given
    pub content: String,
    /// System prompt, defaults to the provider's
    pub system: Option<String>,
    pub output_mode: OutputMode,
    pub stream: bool,
    /// Overrides the configured model
    pub model: Option<String>,
    /// Full conversation; replaces the system/user pair
    pub messages: Option<Vec<Message>>,
    /// Extra request fields (temperature, max_tokens, ...)
    pub params: Map<String, Value>,
}

impl ChatOptions {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Chat client bound to one provider and its settings
pub struct ChatClient<T = ProviderClient> {
    provider: Provider,
    service: ServiceConfig,
    transport: T,
}

impl ChatClient<ProviderClient> {
    /// Resolve the provider's section from `settings` and build an HTTP client
    pub fn from_settings(settings: &Settings, provider: Provider) -> Result<Self, ChatError> {
        let service = settings.service(provider.section())?;
        Self::new(provider, service)
    }

    pub fn new(provider: Provider, service: ServiceConfig) -> Result<Self, ChatError> {
        let transport = ProviderClient::new(provider, &service)?;
        Ok(Self::with_transport(provider, service, transport))
    }
}

impl<T: ChatTransport> ChatClient<T> {
    pub fn with_transport(provider: Provider, service: ServiceConfig, transport: T) -> Self {
        Self {
            provider,
            service,
            transport,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn service(&self) -> &ServiceConfig {
        &self.service
    }

    /// Validate options and build the outgoing request
    pub fn build_request(&self, options: &ChatOptions) -> Result<ChatRequest, ChatError> {
        if options.output_mode == OutputMode::Both && !self.provider.supports_reasoning() {
            return Err(ChatError::InvalidArgument(format!(
                "output mode 'both' is not supported by {}",
                self.provider.name()
            )));
        }

        if let Some(key) = ChatRequest::RESERVED_KEYS
            .iter()
            .find(|k| options.params.contains_key(**k))
        {
            return Err(ChatError::InvalidArgument(format!(
                "parameter '{}' cannot be passed through",
                key
            )));
        }

        let model = options
            .model
            .clone()
            .or_else(|| self.service.model.clone())
            .ok_or_else(|| ConfigError::MissingModel(self.provider.section().to_string()))?;

        let messages = match &options.messages {
            Some(history) => history.clone(),
            None => {
                let system = options
                    .system
                    .as_deref()
                    .unwrap_or(self.provider.default_system_prompt());
                Message::pair(system, options.content.clone())
            }
        };

        Ok(ChatRequest {
            model,
            messages,
            stream: options.stream,
            params: options.params.clone(),
        })
    }

    /// Run one chat completion.
    ///
    /// When streaming, fragments are sent to `echo` as they arrive.
    pub async fn chat(
        &self,
        options: ChatOptions,
        echo: Option<&mpsc::UnboundedSender<StreamDelta>>,
    ) -> Result<ChatOutput, ChatError> {
        let request = self.build_request(&options)?;
        let mode = options.output_mode;

        let start = Instant::now();
        tracing::info!(
            target: "llm",
            provider = %self.provider,
            model = %request.model,
            message_count = request.messages.len(),
            stream = request.stream,
            output_mode = %mode,
            "Starting chat completion"
        );

        let (output, usage) = if request.stream {
            let stream = self.transport.stream(request).await?;
            match mode {
                OutputMode::Raw => self.collect_chunks(stream, echo).await?,
                OutputMode::Text | OutputMode::Both => {
                    self.accumulate_text(stream, mode, echo).await?
                }
            }
        } else {
            let response = self.transport.complete(request).await?;
            let usage = response.usage.clone();
            (Self::reshape(response, mode)?, usage)
        };

        tracing::info!(
            target: "llm",
            provider = %self.provider,
            elapsed_ms = start.elapsed().as_millis() as u64,
            input_tokens = usage.as_ref().map(|u| u.prompt_tokens),
            output_tokens = usage.as_ref().map(|u| u.completion_tokens),
            "Chat completion finished"
        );

        Ok(output)
    }

    fn reshape(response: ChatCompletion, mode: OutputMode) -> Result<ChatOutput, ChatError> {
        if mode == OutputMode::Raw {
            return Ok(ChatOutput::Raw(response));
        }

        let message = response.message().ok_or(ChatError::EmptyResponse)?;
        let content = message.content.clone().unwrap_or_default();

        Ok(match mode {
            OutputMode::Both => ChatOutput::Both {
                content,
                reasoning: message.reasoning_content.clone().unwrap_or_default(),
            },
            _ => ChatOutput::Text(content),
        })
    }

    async fn collect_chunks(
        &self,
        mut stream: ChunkStream,
        echo: Option<&mpsc::UnboundedSender<StreamDelta>>,
    ) -> Result<(ChatOutput, Option<Usage>), ChatError> {
        let mut chunks = Vec::new();
        let mut usage = None;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if chunk.usage.is_some() {
                usage = chunk.usage.clone();
            }

            let has_reasoning = self.provider.supports_reasoning() && chunk.reasoning().is_some();
            if chunk.content().is_some() || has_reasoning {
                emit(echo, StreamDelta::Chunk(chunk.clone()));
                chunks.push(chunk);
            }
        }

        Ok((ChatOutput::Chunks(chunks), usage))
    }

    async fn accumulate_text(
        &self,
        mut stream: ChunkStream,
        mode: OutputMode,
        echo: Option<&mpsc::UnboundedSender<StreamDelta>>,
    ) -> Result<(ChatOutput, Option<Usage>), ChatError> {
        let mut content = String::new();
        let mut reasoning = String::new();
        let mut usage = None;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if chunk.usage.is_some() {
                usage = chunk.usage.clone();
            }

            let thinking = chunk
                .reasoning()
                .filter(|_| self.provider.supports_reasoning());

            if let Some(fragment) = thinking {
                reasoning.push_str(fragment);
                emit(echo, StreamDelta::Reasoning(fragment.to_string()));
            } else if let Some(fragment) = chunk.content() {
                content.push_str(fragment);
                emit(echo, StreamDelta::Text(fragment.to_string()));
            }
        }

        emit(echo, StreamDelta::Done);

        let output = match mode {
            OutputMode::Both => ChatOutput::Both { content, reasoning },
            _ => ChatOutput::Text(content),
        };
        Ok((output, usage))
    }
}

fn emit(echo: Option<&mpsc::UnboundedSender<StreamDelta>>, delta: StreamDelta) {
    if let Some(tx) = echo {
        let _ = tx.send(delta);
    }
}

/// Resolve `provider` from `settings` and run a single call
pub async fn chat(
    settings: &Settings,
    provider: Provider,
    options: ChatOptions,
    echo: Option<&mpsc::UnboundedSender<StreamDelta>>,
) -> Result<ChatOutput, ChatError> {
    ChatClient::from_settings(settings, provider)?
        .chat(options, echo)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{CompletionChoice, CompletionMessage};
    use async_trait::async_trait;
    use futures::stream;
    use std::sync::Mutex;

    /// Transport that records requests and replays canned responses
    #[derive(Default)]
    struct MockTransport {
        completion: ChatCompletion,
        /// `None` entries become decode errors
        chunks: Vec<Option<ChatCompletionChunk>>,
        status: Option<reqwest::StatusCode>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl MockTransport {
        fn replying(content: Option<&str>, reasoning: Option<&str>) -> Self {
            Self {
                completion: ChatCompletion {
                    id: "resp-1".to_string(),
                    model: "gpt-x".to_string(),
                    choices: vec![CompletionChoice {
                        message: CompletionMessage {
                            role: Some("assistant".to_string()),
                            content: content.map(String::from),
                            reasoning_content: reasoning.map(String::from),
                        },
                        finish_reason: Some("stop".to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                ..Default::default()
            }
        }

        fn streaming(chunks: Vec<ChatCompletionChunk>) -> Self {
            Self {
                chunks: chunks.into_iter().map(Some).collect(),
                ..Default::default()
            }
        }

        fn check(&self, request: ChatRequest) -> Result<(), TransportError> {
            self.requests.lock().unwrap().push(request);
            match self.status {
                Some(status) => Err(TransportError::Api {
                    status,
                    body: "denied".to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, TransportError> {
            self.check(request)?;
            Ok(self.completion.clone())
        }

        async fn stream(&self, request: ChatRequest) -> Result<ChunkStream, TransportError> {
            self.check(request)?;
            let items: Vec<Result<ChatCompletionChunk, TransportError>> = self
                .chunks
                .iter()
                .cloned()
                .map(|chunk| {
                    chunk.ok_or_else(|| {
                        serde_json::from_str::<ChatCompletionChunk>("{")
                            .unwrap_err()
                            .into()
                    })
                })
                .collect();
            Ok(stream::iter(items).boxed())
        }
    }

    fn openai(transport: MockTransport) -> ChatClient<MockTransport> {
        ChatClient::with_transport(
            Provider::OpenAI,
            ServiceConfig::new("k").with_model("gpt-x"),
            transport,
        )
    }

    fn deepseek(transport: MockTransport) -> ChatClient<MockTransport> {
        ChatClient::with_transport(
            Provider::DeepSeek,
            ServiceConfig::new("ds").with_model("deepseek-reasoner"),
            transport,
        )
    }

    fn sent(client: &ChatClient<MockTransport>) -> Vec<ChatRequest> {
        client.transport.requests.lock().unwrap().clone()
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<StreamDelta>) -> Vec<StreamDelta> {
        let mut out = Vec::new();
        while let Ok(delta) = rx.try_recv() {
            out.push(delta);
        }
        out
    }

    #[tokio::test]
    async fn test_text_mode_returns_content() {
        let client = openai(MockTransport::replying(Some("hello"), None));
        let output = client.chat(ChatOptions::new("hi"), None).await.unwrap();
        assert_eq!(output, ChatOutput::Text("hello".to_string()));

        let requests = sent(&client);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-x");
        assert!(!requests[0].stream);
        assert_eq!(
            requests[0].messages,
            Message::pair(Provider::OpenAI.default_system_prompt(), "hi")
        );
    }

    #[tokio::test]
    async fn test_null_content_is_empty_text() {
        let client = openai(MockTransport::replying(None, None));
        let output = client.chat(ChatOptions::new("hi"), None).await.unwrap();
        assert_eq!(output.text(), Some(""));
    }

    #[tokio::test]
    async fn test_raw_mode_returns_response() {
        let transport = MockTransport::replying(Some("hello"), None);
        let expected = transport.completion.clone();
        let client = openai(transport);

        let output = client
            .chat(ChatOptions::new("hi").with_output_mode(OutputMode::Raw), None)
            .await
            .unwrap();
        assert_eq!(output, ChatOutput::Raw(expected));
    }

    #[tokio::test]
    async fn test_both_mode_non_streaming() {
        let client = deepseek(MockTransport::replying(Some("24"), Some("8 / (4 - 8/6)...")));
        let output = client
            .chat(ChatOptions::new("4 4 6 8").with_output_mode(OutputMode::Both), None)
            .await
            .unwrap();
        assert_eq!(
            output.into_pair(),
            Some(("24".to_string(), "8 / (4 - 8/6)...".to_string()))
        );
    }

    #[tokio::test]
    async fn test_both_mode_missing_reasoning_is_empty() {
        let client = deepseek(MockTransport::replying(Some("24"), None));
        let output = client
            .chat(ChatOptions::new("q").with_output_mode(OutputMode::Both), None)
            .await
            .unwrap();
        assert_eq!(output.into_pair(), Some(("24".to_string(), String::new())));
    }

    #[tokio::test]
    async fn test_both_mode_rejected_without_reasoning_channel() {
        let client = openai(MockTransport::replying(Some("x"), None));
        let err = client
            .chat(ChatOptions::new("q").with_output_mode(OutputMode::Both), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::InvalidArgument(_)));
        assert!(sent(&client).is_empty());
    }

    #[test]
    fn test_output_mode_parsing() {
        assert_eq!("json".parse::<OutputMode>().unwrap(), OutputMode::Raw);
        assert_eq!("raw".parse::<OutputMode>().unwrap(), OutputMode::Raw);
        assert_eq!("text".parse::<OutputMode>().unwrap(), OutputMode::Text);
        assert_eq!("both".parse::<OutputMode>().unwrap(), OutputMode::Both);
        for bad in ["", "xml", "TEXT"] {
            assert!(matches!(
                bad.parse::<OutputMode>(),
                Err(ChatError::InvalidArgument(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_history_replaces_synthesized_pair() {
        let history = vec![
            Message::system("You are terse."),
            Message::user("2+2?"),
            Message::assistant("4"),
            Message::user("and times 3?"),
        ];
        let client = deepseek(MockTransport::replying(Some("12"), None));
        client
            .chat(
                ChatOptions::new("ignored")
                    .with_system("ignored too")
                    .with_messages(history.clone()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(sent(&client)[0].messages, history);
    }

    #[tokio::test]
    async fn test_model_override_wins() {
        let client = deepseek(MockTransport::replying(Some("ok"), None));
        client
            .chat(ChatOptions::new("q").with_model("deepseek-chat"), None)
            .await
            .unwrap();
        assert_eq!(sent(&client)[0].model, "deepseek-chat");
    }

    #[tokio::test]
    async fn test_missing_model_fails_before_request() {
        let client = ChatClient::with_transport(
            Provider::OpenAI,
            ServiceConfig::new("k"),
            MockTransport::replying(Some("x"), None),
        );
        let err = client.chat(ChatOptions::new("q"), None).await.unwrap_err();
        assert!(matches!(err, ChatError::Config(ConfigError::MissingModel(_))));
        assert!(sent(&client).is_empty());
    }

    #[tokio::test]
    async fn test_params_pass_through() {
        let client = openai(MockTransport::replying(Some("ok"), None));
        client
            .chat(
                ChatOptions::new("q")
                    .with_param("temperature", 0.3)
                    .with_param("max_tokens", 16),
                None,
            )
            .await
            .unwrap();

        let params = &sent(&client)[0].params;
        assert_eq!(params["temperature"], 0.3);
        assert_eq!(params["max_tokens"], 16);
    }

    #[tokio::test]
    async fn test_reserved_param_rejected() {
        let client = openai(MockTransport::replying(Some("ok"), None));
        let err = client
            .chat(ChatOptions::new("q").with_param("stream", true), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::InvalidArgument(_)));
        assert!(sent(&client).is_empty());
    }

    #[tokio::test]
    async fn test_stream_text_concatenates_and_echoes() {
        let client = openai(MockTransport::streaming(vec![
            ChatCompletionChunk::text("he"),
            ChatCompletionChunk::text("llo"),
        ]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let output = client
            .chat(ChatOptions::new("hi").with_stream(true), Some(&tx))
            .await
            .unwrap();

        assert_eq!(output, ChatOutput::Text("hello".to_string()));
        assert!(sent(&client)[0].stream);
        assert_eq!(
            drain(&mut rx),
            vec![
                StreamDelta::Text("he".to_string()),
                StreamDelta::Text("llo".to_string()),
                StreamDelta::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_both_separates_channels() {
        let client = deepseek(MockTransport::streaming(vec![
            ChatCompletionChunk::thinking("Try "),
            ChatCompletionChunk::thinking("8/(3-8/3)"),
            ChatCompletionChunk::text(""),
            ChatCompletionChunk::text("Answer: "),
            ChatCompletionChunk::text("24"),
        ]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let output = client
            .chat(
                ChatOptions::new("q")
                    .with_stream(true)
                    .with_output_mode(OutputMode::Both),
                Some(&tx),
            )
            .await
            .unwrap();

        assert_eq!(
            output.into_pair(),
            Some(("Answer: 24".to_string(), "Try 8/(3-8/3)".to_string()))
        );
        assert_eq!(
            drain(&mut rx),
            vec![
                StreamDelta::Reasoning("Try ".to_string()),
                StreamDelta::Reasoning("8/(3-8/3)".to_string()),
                StreamDelta::Text("Answer: ".to_string()),
                StreamDelta::Text("24".to_string()),
                StreamDelta::Done,
            ]
        );
    }

    #[tokio::test]
    async fn test_stream_text_mode_drops_reasoning_from_answer() {
        let client = deepseek(MockTransport::streaming(vec![
            ChatCompletionChunk::thinking("hmm"),
            ChatCompletionChunk::text("ok"),
        ]));
        let output = client
            .chat(ChatOptions::new("q").with_stream(true), None)
            .await
            .unwrap();
        assert_eq!(output, ChatOutput::Text("ok".to_string()));
    }

    #[tokio::test]
    async fn test_stream_raw_collects_payload_chunks() {
        let role_only = ChatCompletionChunk::default();
        let client = deepseek(MockTransport::streaming(vec![
            role_only,
            ChatCompletionChunk::thinking("why"),
            ChatCompletionChunk::text("because"),
        ]));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let output = client
            .chat(
                ChatOptions::new("q")
                    .with_stream(true)
                    .with_output_mode(OutputMode::Raw),
                Some(&tx),
            )
            .await
            .unwrap();

        let expected = vec![
            ChatCompletionChunk::thinking("why"),
            ChatCompletionChunk::text("because"),
        ];
        assert_eq!(output, ChatOutput::Chunks(expected.clone()));
        assert_eq!(
            drain(&mut rx),
            expected.into_iter().map(StreamDelta::Chunk).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_stream_failure_keeps_echoed_fragments() {
        let client = openai(MockTransport {
            chunks: vec![Some(ChatCompletionChunk::text("par")), None],
            ..Default::default()
        });
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = client
            .chat(ChatOptions::new("q").with_stream(true), Some(&tx))
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Transport(TransportError::Decode(_))));
        assert_eq!(drain(&mut rx), vec![StreamDelta::Text("par".to_string())]);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = openai(MockTransport {
            status: Some(reqwest::StatusCode::UNAUTHORIZED),
            ..Default::default()
        });
        let err = client.chat(ChatOptions::new("q"), None).await.unwrap_err();
        match err {
            ChatError::Transport(TransportError::Api { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
                assert_eq!(body, "denied");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_response() {
        let client = openai(MockTransport::default());
        let err = client.chat(ChatOptions::new("q"), None).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_missing_section_fails_before_client() {
        let settings = Settings::from_str("[openai]\napi_key = \"k\"\n").unwrap();
        let err = chat(&settings, Provider::DeepSeek, ChatOptions::new("q"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Config(ConfigError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_client() {
        let settings = Settings::from_str("[deepseek]\nmodel = \"deepseek-chat\"\n").unwrap();
        let err = ChatClient::from_settings(&settings, Provider::DeepSeek).err().unwrap();
        assert!(matches!(err, ChatError::Config(ConfigError::MissingKey { .. })));
    }
}
