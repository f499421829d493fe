//! modelcall CLI
//!
//! Sends one prompt (or a saved conversation) to an OpenAI-compatible chat
//! API and prints the answer, streaming it when asked.

use anyhow::{bail, Context, Result};
use clap::Parser;
use modelcall::{
    ChatClient, ChatOptions, ChatOutput, Message, OutputMode, Provider, Settings, StreamDelta,
    Telemetry,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "modelcall")]
#[command(about = "Send a prompt to an OpenAI-compatible chat API", long_about = None)]
struct Cli {
    /// Prompt to send (not needed with --history)
    prompt: Option<String>,

    /// Settings file (default: ./config.toml, then ~/.config/modelcall/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Provider section to use (openai, deepseek)
    #[arg(short, long, default_value = "openai")]
    provider: Provider,

    /// Output mode: json, text or both
    #[arg(long, default_value = "text")]
    mode: String,

    /// Stream the answer as it is generated
    #[arg(long)]
    stream: bool,

    /// Model to use instead of the configured one
    #[arg(short, long)]
    model: Option<String>,

    /// System prompt (default depends on the provider)
    #[arg(short, long)]
    system: Option<String>,

    /// JSON file with the conversation to send, e.g. [{"role":"user","content":"hi"}]
    #[arg(long)]
    history: Option<PathBuf>,

    /// Extra request field, value parsed as JSON when possible (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Directory for JSON log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Split `key=value`, reading the value as JSON and falling back to a string
fn parse_param(raw: &str) -> Result<(String, serde_json::Value)> {
    let (key, value) = raw
        .split_once('=')
        .with_context(|| format!("parameter '{}' must look like KEY=VALUE", raw))?;

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.trim().to_string(), value))
}

fn build_options(cli: &Cli) -> Result<ChatOptions> {
    let mut options = ChatOptions::new(cli.prompt.clone().unwrap_or_default())
        .with_output_mode(cli.mode.parse::<OutputMode>()?)
        .with_stream(cli.stream);

    if let Some(ref system) = cli.system {
        options = options.with_system(system);
    }
    if let Some(ref model) = cli.model {
        options = options.with_model(model);
    }

    if let Some(ref path) = cli.history {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read history {}", path.display()))?;
        let messages: Vec<Message> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history {}", path.display()))?;
        options = options.with_messages(messages);
    } else if cli.prompt.is_none() {
        bail!("a prompt is required unless --history is given");
    }

    for raw in &cli.params {
        let (key, value) = parse_param(raw)?;
        options = options.with_param(key, value);
    }

    Ok(options)
}

/// Render streamed fragments as they arrive
async fn print_deltas(mut rx: mpsc::UnboundedReceiver<StreamDelta>) {
    let mut stdout = std::io::stdout();
    while let Some(delta) = rx.recv().await {
        match delta {
            StreamDelta::Chunk(chunk) => match serde_json::to_string(&chunk) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::warn!(error = %e, "Failed to render chunk"),
            },
            StreamDelta::Text(text) => print!("{}", text),
            StreamDelta::Reasoning(text) => print!("[reasoning] {}", text),
            StreamDelta::Done => println!(),
        }
        stdout.flush().ok();
    }
}

fn print_output(output: &ChatOutput) -> Result<()> {
    match output {
        ChatOutput::Raw(response) => println!("{}", serde_json::to_string_pretty(response)?),
        ChatOutput::Chunks(chunks) => tracing::debug!(count = chunks.len(), "Collected chunks"),
        ChatOutput::Text(text) => println!("{}", text),
        ChatOutput::Both { content, reasoning } => {
            println!("[reasoning]\n{}\n", reasoning);
            println!("{}", content);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let _telemetry = Telemetry::init(cli.log_dir.clone(), cli.verbose)?;

    let options = build_options(&cli)?;
    let streaming = options.stream;

    let config_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let settings = Settings::load(&config_path)?;
    let client = ChatClient::from_settings(&settings, cli.provider)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_deltas(rx));

    let result = client.chat(options, Some(&tx)).await;

    drop(tx);
    printer.await?;

    let output = result?;
    if !streaming {
        print_output(&output)?;
    }

    Ok(())
}
