//! Assistant pipeline: build context, call the gateway, sanitize the reply.
//!
//! Stateless across invocations. Concurrent conversations are independent;
//! each call receives its own history snapshot and produces its own context.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::ContextBuilder;
use crate::error::AssistantError;
use crate::gateway::CompletionClient;
use crate::sanitize::Sanitizer;
use crate::types::{CompletionRequest, GenerationParams, HistoryEntry};

use sunshine_core::AssistantConfig;

/// The conversational assistant.
///
/// Wires the context builder, completion gateway, and sanitizer into one
/// linear flow with a single suspension point at the gateway call.
pub struct Assistant {
    builder: ContextBuilder,
    sanitizer: Sanitizer,
    client: Arc<dyn CompletionClient>,
    params: GenerationParams,
}

impl Assistant {
    /// Create an assistant from configuration and an injected gateway client.
    pub fn new(config: &AssistantConfig, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            builder: ContextBuilder::new(config.context_turns, config.max_message_chars),
            sanitizer: Sanitizer::new(),
            client,
            params: GenerationParams::from(config),
        }
    }

    /// Handle one user message against the supplied session history.
    ///
    /// Returns the sanitized reply text, or a distinct error for each
    /// failure mode: invalid input (before any external call), gateway
    /// failure, or an empty completion. Never retries; a failed attempt
    /// must be re-initiated by the caller as a new invocation.
    pub async fn respond(
        &self,
        new_input: &str,
        history: &[HistoryEntry],
    ) -> Result<String, AssistantError> {
        let messages = self.builder.build(new_input, history)?;
        debug!(
            context_len = messages.len(),
            input_chars = new_input.trim().chars().count(),
            "Context built"
        );

        let request = CompletionRequest {
            messages,
            params: self.params,
        };

        let raw = match self.client.complete(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Completion call failed");
                return Err(e);
            }
        };

        let reply = self.sanitizer.sanitize(&raw);
        debug!(raw_chars = raw.len(), reply_chars = reply.len(), "Reply sanitized");
        Ok(reply)
    }
}

// =============================================================================
// Tests
// =============================================================================
