//! Conversation and wire types for the assistant subsystem.

use serde::{Deserialize, Serialize};
use sunshine_core::AssistantConfig;

// =============================================================================
// Roles and turns
// =============================================================================

/// Originating role of a conversation turn.
///
/// The UI layer speaks a `"user"` / `"bot"` vocabulary; this enum decouples
/// the internal representation from that wire convention. Parsing happens
/// once at the boundary via [`Role::from_wire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Parse an inbound history role tag.
    ///
    /// Returns `None` for tags that are neither `"user"` nor `"bot"`; such
    /// entries are silently excluded from the context window rather than
    /// treated as a validation failure.
    pub fn from_wire(tag: &str) -> Option<Role> {
        match tag {
            "user" => Some(Role::User),
            "bot" => Some(Role::Assistant),
            _ => None,
        }
    }

    /// Role string used in provider chat messages.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A prior turn as supplied by the caller, in the UI layer's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Role tag in the caller's vocabulary: `"user"` or `"bot"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Message text.
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            kind: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            kind: "bot".to_string(),
            content: content.into(),
        }
    }
}

/// A validated conversation turn. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Parse a caller-supplied history entry, discarding unknown role tags.
    pub fn from_entry(entry: &HistoryEntry) -> Option<Turn> {
        Role::from_wire(&entry.kind).map(|role| Turn {
            role,
            content: entry.content.clone(),
        })
    }
}

// =============================================================================
// Provider wire types
// =============================================================================

/// One role-tagged message in a provider chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn from_turn(turn: &Turn) -> Self {
        Self {
            role: turn.role.as_wire(),
            content: turn.content.clone(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Ordered message sequence submitted to the completion provider.
///
/// Invariant: the first entry is the fixed system preamble, the last entry
/// is the trimmed new user input, and the middle is the trailing window of
/// prior turns mapped role-for-role. Length = window length + 2.
pub type MessageContext = Vec<ChatMessage>;

/// Static generation parameters for a completion call.
///
/// These are deployment configuration, never derived from conversation
/// state and never caller-adjustable per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1500,
            temperature: 0.7,
            top_p: 0.9,
            frequency_penalty: 0.1,
            presence_penalty: 0.1,
        }
    }
}

impl From<&AssistantConfig> for GenerationParams {
    fn from(config: &AssistantConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
            frequency_penalty: config.frequency_penalty,
            presence_penalty: config.presence_penalty,
        }
    }
}

/// A fully assembled completion request: context plus generation parameters.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub messages: MessageContext,
    #[serde(flatten)]
    pub params: GenerationParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Role parsing ----

    #[test]
    fn test_role_from_wire_user() {
        assert_eq!(Role::from_wire("user"), Some(Role::User));
    }

    #[test]
    fn test_role_from_wire_bot_maps_to_assistant() {
        assert_eq!(Role::from_wire("bot"), Some(Role::Assistant));
    }

    #[test]
    fn test_role_from_wire_unknown() {
        assert_eq!(Role::from_wire("system"), None);
        assert_eq!(Role::from_wire("assistant"), None);
        assert_eq!(Role::from_wire(""), None);
        assert_eq!(Role::from_wire("USER"), None);
    }

    #[test]
    fn test_role_as_wire() {
        assert_eq!(Role::User.as_wire(), "user");
        assert_eq!(Role::Assistant.as_wire(), "assistant");
    }

    // ---- Turn parsing ----

    #[test]
    fn test_turn_from_entry_valid() {
        let entry = HistoryEntry::bot("hello");
        let turn = Turn::from_entry(&entry).unwrap();
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.content, "hello");
    }

    #[test]
    fn test_turn_from_entry_unknown_role() {
        let entry = HistoryEntry {
            kind: "moderator".to_string(),
            content: "hi".to_string(),
        };
        assert!(Turn::from_entry(&entry).is_none());
    }

    // ---- History entry serde ----

    #[test]
    fn test_history_entry_deserializes_type_key() {
        let entry: HistoryEntry =
            serde_json::from_str(r#"{"type": "bot", "content": "oi"}"#).unwrap();
        assert_eq!(entry.kind, "bot");
        assert_eq!(entry.content, "oi");
    }

    #[test]
    fn test_history_entry_serializes_type_key() {
        let json = serde_json::to_string(&HistoryEntry::user("oi")).unwrap();
        assert!(json.contains("\"type\":\"user\""));
    }

    // ---- Chat messages ----

    #[test]
    fn test_chat_message_from_turn() {
        let msg = ChatMessage::from_turn(&Turn {
            role: Role::Assistant,
            content: "resposta".to_string(),
        });
        assert_eq!(msg.role, "assistant");
        assert_eq!(msg.content, "resposta");
    }

    // ---- Generation params ----

    #[test]
    fn test_generation_params_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 1500);
        assert!((params.temperature - 0.7).abs() < f32::EPSILON);
        assert!((params.top_p - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_generation_params_from_config() {
        let mut config = AssistantConfig::default();
        config.max_tokens = 256;
        config.temperature = 0.2;
        let params = GenerationParams::from(&config);
        assert_eq!(params.max_tokens, 256);
        assert!((params.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_completion_request_serializes_flat_params() {
        let request = CompletionRequest {
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            params: GenerationParams::default(),
        };
        let value = serde_json::to_value(&request).unwrap();
        // Params are flattened alongside the message list, matching the
        // provider's chat-completions body shape.
        assert_eq!(value["max_tokens"], 1500);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert!(value.get("params").is_none());
    }
}
