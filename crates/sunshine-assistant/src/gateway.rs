//! Completion gateway: the single outbound call to the inference provider.
//!
//! One HTTPS call per invocation, no retry, no streaming. The bearer token
//! is injected at construction and never read from globals or logged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AssistantError;
use crate::types::CompletionRequest;

/// Abstraction over the chat-completion provider.
///
/// The pipeline depends on this trait so tests can substitute a recording
/// double for the network client.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit a completion request and return the text of the first choice.
    ///
    /// Atomic from the caller's perspective: either the complete text or an
    /// error, never a partial result.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError>;
}

// =============================================================================
// HfInferenceClient
// =============================================================================

/// Hugging Face inference-router client.
///
/// Calls `POST {base_url}/{provider}/v1/chat/completions` with a bearer
/// token. Provider and model are fixed at construction; they are deployment
/// configuration, not per-call inputs.
pub struct HfInferenceClient {
    base_url: String,
    provider: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    #[serde(flatten)]
    request: &'a CompletionRequest,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl HfInferenceClient {
    /// Create a client for the given router, provider, and model.
    pub fn new(
        base_url: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            provider: provider.into(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/v1/chat/completions",
            self.base_url.trim_end_matches('/'),
            self.provider
        )
    }

    /// Extract the first choice's text from a decoded response.
    ///
    /// A well-formed response with no choices, or a first choice whose
    /// content is absent or whitespace-only, is an empty completion.
    fn extract_text(response: ChatCompletionResponse) -> Result<String, AssistantError> {
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(AssistantError::EmptyCompletion);
        }
        Ok(content.to_string())
    }
}

#[async_trait]
impl CompletionClient for HfInferenceClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AssistantError> {
        let url = self.endpoint();
        let body = ChatCompletionBody {
            model: &self.model,
            request,
        };

        debug!(model = %self.model, messages = request.messages.len(), "Submitting completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::gateway("request to completion provider failed", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::gateway("failed to read provider response", e))?;

        if !status.is_success() {
            return Err(AssistantError::gateway_message(format!(
                "provider error {}: {}",
                status, text
            )));
        }

        let decoded: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| AssistantError::gateway("malformed provider response", e))?;

        Self::extract_text(decoded)
    }
}

// =============================================================================
// Tests
// =============================================================================
