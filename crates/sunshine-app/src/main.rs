//! Sunshine assistant binary - composition root.
//!
//! Ties the assistant crates into a single executable:
//! 1. Load configuration from TOML
//! 2. Initialize tracing
//! 3. Read the inference API token from the environment
//! 4. Construct the gateway client and assistant pipeline
//! 5. Run an interactive chat session (or send a single message)
//!
//! The session transcript lives in memory for the life of the process;
//! nothing is persisted.

mod cli;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use sunshine_assistant::{Assistant, AssistantError, HfInferenceClient, HistoryEntry};
use sunshine_core::SunshineConfig;

use cli::CliArgs;

/// Environment variable holding the inference API bearer token.
const TOKEN_ENV: &str = "HF_TOKEN";

/// Map a pipeline failure to the message shown to the person chatting.
///
/// The error taxonomy is the pipeline's; the phrasing is ours.
fn user_facing_message(err: &AssistantError) -> String {
    match err {
        AssistantError::EmptyMessage => "Digite uma mensagem antes de enviar.".to_string(),
        AssistantError::MessageTooLong(limit) => {
            format!("Mensagem muito longa (máximo {} caracteres).", limit)
        }
        AssistantError::EmptyCompletion => {
            "O assistente não teve nada a dizer. Tente reformular.".to_string()
        }
        AssistantError::Gateway { .. } => {
            "O assistente está indisponível no momento. Tente novamente mais tarde.".to_string()
        }
    }
}

/// Handle one message: call the assistant and, on success, append the
/// exchange to the in-memory transcript.
async fn exchange(
    assistant: &Assistant,
    history: &mut Vec<HistoryEntry>,
    message: &str,
) -> Result<String, AssistantError> {
    let reply = assistant.respond(message, history).await?;
    history.push(HistoryEntry::user(message.trim()));
    history.push(HistoryEntry::bot(reply.clone()));
    Ok(reply)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = SunshineConfig::load_or_default(&config_file);

    // Tracing. CLI flag overrides the config file level.
    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Sunshine assistant v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    if !config.assistant.enabled {
        tracing::error!("Assistant is disabled in configuration");
        return Err("assistant is disabled in configuration".into());
    }

    // Credentials: opaque bearer token, environment-injected, never logged.
    let token = std::env::var(TOKEN_ENV)
        .map_err(|_| format!("inference API token required: set {}", TOKEN_ENV))?;

    let mut assistant_config = config.assistant.clone();
    if let Some(model) = args.model {
        assistant_config.model = model;
    }
    tracing::info!(
        provider = %assistant_config.provider,
        model = %assistant_config.model,
        "Completion gateway configured"
    );

    let client = Arc::new(HfInferenceClient::new(
        &assistant_config.base_url,
        &assistant_config.provider,
        &assistant_config.model,
        token,
    ));
    let assistant = Assistant::new(&assistant_config, client);

    let mut stdout = tokio::io::stdout();
    let mut history: Vec<HistoryEntry> = Vec::new();

    // Single-message mode.
    if let Some(message) = args.message {
        match exchange(&assistant, &mut history, &message).await {
            Ok(reply) => {
                stdout.write_all(reply.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                return Ok(());
            }
            Err(e) => {
                tracing::error!(error = %e, "Message failed");
                return Err(user_facing_message(&e).into());
            }
        }
    }

    // Interactive session. The transcript is the active session's history;
    // it is dropped when the process exits.
    stdout
        .write_all("Sunshine — assistente de apoio psicológico. Ctrl+D para sair.\n".as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        match exchange(&assistant, &mut history, &line).await {
            Ok(reply) => {
                stdout.write_all(reply.as_bytes()).await?;
                stdout.write_all(b"\n\n").await?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Exchange failed");
                stdout.write_all(user_facing_message(&e).as_bytes()).await?;
                stdout.write_all(b"\n\n").await?;
            }
        }
    }

    tracing::info!(turns = history.len(), "Session ended");
    Ok(())
}
