//! Error types for the assistant subsystem.

use sunshine_core::SunshineError;

/// Errors from the assistant pipeline.
///
/// Every failure path is distinguishable so the caller can pick its own
/// user-facing message; the pipeline never retries and never collapses a
/// failure into a default reply.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The user message was empty or whitespace-only. Detected before any
    /// external call is made.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// The user message exceeded the configured length ceiling.
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),

    /// The completion call failed in transport or on the provider side.
    #[error("completion gateway error: {message}")]
    Gateway {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered, but the first choice carried no usable text.
    #[error("empty response from assistant")]
    EmptyCompletion,
}

impl AssistantError {
    /// Wrap a transport or provider failure, keeping the cause for
    /// diagnostics.
    pub fn gateway<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AssistantError::Gateway {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A gateway failure with no underlying error value (e.g. a non-success
    /// HTTP status described only by its body).
    pub fn gateway_message(message: impl Into<String>) -> Self {
        AssistantError::Gateway {
            message: message.into(),
            source: None,
        }
    }
}

impl From<AssistantError> for SunshineError {
    fn from(err: AssistantError) -> Self {
        SunshineError::Assistant(err.to_string())
    }
}
