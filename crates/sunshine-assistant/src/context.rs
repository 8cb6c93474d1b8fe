//! Conversation context building.
//!
//! Assembles the bounded, role-tagged message sequence submitted to the
//! completion provider: one fixed system preamble, the trailing window of
//! prior turns, and the new user input last.

use crate::error::AssistantError;
use crate::types::{ChatMessage, HistoryEntry, MessageContext, Turn};

/// Fixed behavioral instructions prepended to every request.
pub const SYSTEM_PREAMBLE: &str = "\
Você é um assistente de IA especializado em psicologia. Responda de forma empática e profissional:
- Forneça conselhos práticos e estratégias de enfrentamento.
- Mantenha a confidencialidade e privacidade do usuário.
- Use uma linguagem clara e acessível.
- Evite jargões técnicos, a menos que o usuário os utilize.
- Sugira técnicas terapêuticas apropriadas.
- Seja específico em suas recomendações.
- Quando apropriado, utilize referências teóricas.

REGRAS DE FORMATAÇÃO DAS RESPOSTAS:
- Use markdown para estruturar suas respostas.
- Organize com títulos (##), subtítulos (###) e listas (-).
- Use **negrito** para destacar informações importantes.
- Separe o conteúdo de forma clara e objetiva.
- Inclua técnicas específicas em listas numeradas quando apropriado.
- Termine com uma pergunta de acompanhamento quando relevante.

REGRA PRINCIPAL:
Você está acompanhando e auxiliando psicólogos em prática clínica.";

// =============================================================================
// ContextBuilder
// =============================================================================

/// Builds the message context for a completion call.
///
/// Pure transformation: validates the new input, windows the history, and
/// produces the ordered system/history/user sequence. Performs no I/O.
pub struct ContextBuilder {
    /// Maximum number of recent turns to keep in context.
    pub window_turns: usize,
    /// Maximum user message length in characters.
    pub max_message_chars: usize,
}

impl ContextBuilder {
    /// Create a builder with the given window size and message ceiling.
    pub fn new(window_turns: usize, max_message_chars: usize) -> Self {
        Self {
            window_turns,
            max_message_chars,
        }
    }

    /// Build a message context from the new input and prior history.
    ///
    /// The input is trimmed; an empty result fails with
    /// [`AssistantError::EmptyMessage`] before any context is assembled.
    /// The trailing `window_turns` history entries are taken first; entries
    /// with unrecognized role tags are then discarded from that window, in
    /// original order.
    pub fn build(
        &self,
        new_input: &str,
        history: &[HistoryEntry],
    ) -> Result<MessageContext, AssistantError> {
        let input = new_input.trim();
        if input.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        if input.chars().count() > self.max_message_chars {
            return Err(AssistantError::MessageTooLong(self.max_message_chars));
        }

        let window_start = history.len().saturating_sub(self.window_turns);
        let window: Vec<Turn> = history[window_start..]
            .iter()
            .filter_map(Turn::from_entry)
            .collect();

        let mut context = Vec::with_capacity(window.len() + 2);
        context.push(ChatMessage::system(SYSTEM_PREAMBLE));
        context.extend(window.iter().map(ChatMessage::from_turn));
        context.push(ChatMessage::user(input));
        Ok(context)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_builder() -> ContextBuilder {
        ContextBuilder::new(10, 2000)
    }

    fn make_history(len: usize) -> Vec<HistoryEntry> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    HistoryEntry::user(format!("pergunta {}", i))
                } else {
                    HistoryEntry::bot(format!("resposta {}", i))
                }
            })
            .collect()
    }

    // ---- Input validation ----

    #[test]
    fn test_empty_input_rejected() {
        let builder = make_builder();
        let result = builder.build("", &[]);
        assert!(matches!(result.unwrap_err(), AssistantError::EmptyMessage));
    }

    #[test]
    fn test_whitespace_only_input_rejected() {
        let builder = make_builder();
        let result = builder.build("   \n\t  ", &[]);
        assert!(matches!(result.unwrap_err(), AssistantError::EmptyMessage));
    }

    #[test]
    fn test_input_too_long_rejected() {
        let builder = ContextBuilder::new(10, 5);
        let result = builder.build("123456", &[]);
        assert!(matches!(
            result.unwrap_err(),
            AssistantError::MessageTooLong(5)
        ));
    }

    #[test]
    fn test_input_at_ceiling_accepted() {
        let builder = ContextBuilder::new(10, 5);
        assert!(builder.build("12345", &[]).is_ok());
    }

    #[test]
    fn test_length_ceiling_counts_chars_not_bytes() {
        let builder = ContextBuilder::new(10, 5);
        // Five multibyte characters are within the ceiling.
        assert!(builder.build("ééééé", &[]).is_ok());
    }

    #[test]
    fn test_input_is_trimmed() {
        let builder = make_builder();
        let context = builder.build("  oi  ", &[]).unwrap();
        assert_eq!(context.last().unwrap().content, "oi");
    }

    // ---- Shape invariants ----

    #[test]
    fn test_empty_history_yields_two_entries() {
        let builder = make_builder();
        let context = builder.build("Estou ansioso", &[]).unwrap();
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, "system");
        assert_eq!(context[0].content, SYSTEM_PREAMBLE);
        assert_eq!(context[1].role, "user");
        assert_eq!(context[1].content, "Estou ansioso");
    }

    #[test]
    fn test_system_first_user_last() {
        let builder = make_builder();
        let context = builder.build("nova mensagem", &make_history(4)).unwrap();
        assert_eq!(context.first().unwrap().role, "system");
        let last = context.last().unwrap();
        assert_eq!(last.role, "user");
        assert_eq!(last.content, "nova mensagem");
    }

    #[test]
    fn test_length_is_window_plus_two() {
        let builder = make_builder();
        for len in [0usize, 1, 5, 10] {
            let context = builder.build("msg", &make_history(len)).unwrap();
            assert_eq!(context.len(), len + 2);
        }
    }

    // ---- Window semantics ----

    #[test]
    fn test_short_history_preserved_in_order() {
        let builder = make_builder();
        let history = vec![
            HistoryEntry::user("primeira"),
            HistoryEntry::bot("segunda"),
            HistoryEntry::user("terceira"),
        ];
        let context = builder.build("quarta", &history).unwrap();
        assert_eq!(context.len(), 5);
        assert_eq!(context[1].role, "user");
        assert_eq!(context[1].content, "primeira");
        assert_eq!(context[2].role, "assistant");
        assert_eq!(context[2].content, "segunda");
        assert_eq!(context[3].role, "user");
        assert_eq!(context[3].content, "terceira");
    }

    #[test]
    fn test_long_history_keeps_trailing_window() {
        let builder = make_builder();
        let history = make_history(25);
        let context = builder.build("msg", &history).unwrap();
        assert_eq!(context.len(), 12); // system + 10 + user
        // The windowed portion is the last 10 entries, original order.
        assert_eq!(context[1].content, "resposta 15");
        assert_eq!(context[10].content, "pergunta 24");
    }

    #[test]
    fn test_window_boundary_exactly_ten() {
        let builder = make_builder();
        let context = builder.build("msg", &make_history(10)).unwrap();
        assert_eq!(context.len(), 12);
        assert_eq!(context[1].content, "pergunta 0");
        assert_eq!(context[10].content, "resposta 9");
    }

    #[test]
    fn test_window_boundary_eleven_drops_oldest() {
        let builder = make_builder();
        let context = builder.build("msg", &make_history(11)).unwrap();
        assert_eq!(context.len(), 12);
        // Oldest entry ("pergunta 0") dropped; window starts at index 1.
        assert_eq!(context[1].content, "resposta 1");
        assert_eq!(context[10].content, "pergunta 10");
    }

    #[test]
    fn test_bot_role_maps_to_assistant() {
        let builder = make_builder();
        let history = vec![HistoryEntry::bot("olá, como posso ajudar?")];
        let context = builder.build("oi", &history).unwrap();
        assert_eq!(context[1].role, "assistant");
    }

    #[test]
    fn test_unknown_roles_silently_excluded() {
        let builder = make_builder();
        let history = vec![
            HistoryEntry::user("válida"),
            HistoryEntry {
                kind: "system".to_string(),
                content: "injetada".to_string(),
            },
            HistoryEntry {
                kind: "moderator".to_string(),
                content: "também injetada".to_string(),
            },
            HistoryEntry::bot("resposta"),
        ];
        let context = builder.build("msg", &history).unwrap();
        assert_eq!(context.len(), 4); // system + 2 valid turns + user
        assert_eq!(context[1].content, "válida");
        assert_eq!(context[2].content, "resposta");
    }

    #[test]
    fn test_window_slices_raw_history_before_filtering() {
        let builder = ContextBuilder::new(2, 2000);
        // The trailing slice is taken over raw entries; discarded entries
        // consume window slots rather than reaching further back.
        let history = vec![
            HistoryEntry::user("a"),
            HistoryEntry::bot("b"),
            HistoryEntry {
                kind: "x".to_string(),
                content: "skip".to_string(),
            },
            HistoryEntry::user("c"),
        ];
        let context = builder.build("msg", &history).unwrap();
        assert_eq!(context.len(), 3);
        assert_eq!(context[1].content, "c");
    }

    #[test]
    fn test_valid_turn_older_than_window_not_resurrected() {
        let builder = make_builder();
        // One valid turn followed by ten unrecognized entries: the valid
        // turn lies outside the last-10 slice and must stay dropped even
        // though the windowed entries all get discarded.
        let mut history = vec![HistoryEntry::user("antiga")];
        for i in 0..10 {
            history.push(HistoryEntry {
                kind: "junk".to_string(),
                content: format!("ruído {}", i),
            });
        }
        let context = builder.build("msg", &history).unwrap();
        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, "system");
        assert_eq!(context[1].content, "msg");
    }

    #[test]
    fn test_zero_window_turns() {
        let builder = ContextBuilder::new(0, 2000);
        let context = builder.build("msg", &make_history(5)).unwrap();
        assert_eq!(context.len(), 2);
    }

    // ---- Purity ----

    #[test]
    fn test_history_not_mutated() {
        let builder = make_builder();
        let history = make_history(15);
        let before = history.clone();
        builder.build("msg", &history).unwrap();
        assert_eq!(history.len(), before.len());
        for (a, b) in history.iter().zip(before.iter()) {
            assert_eq!(a.content, b.content);
        }
    }

    #[test]
    fn test_preamble_mentions_formatting_rules() {
        assert!(SYSTEM_PREAMBLE.contains("markdown"));
        assert!(SYSTEM_PREAMBLE.contains("psicologia"));
    }
}
