//! Reply sanitization.
//!
//! Some models emit internal reasoning wrapped in `<think>...</think>`
//! tags. Those spans must never reach an end user.

use regex::Regex;

/// Strips model-reasoning markup from completion text.
pub struct Sanitizer {
    think_span: Regex,
}

impl Sanitizer {
    /// Create a sanitizer with its pattern compiled once.
    pub fn new() -> Self {
        // Case-insensitive, dot matches newline, non-greedy per span.
        // An opening tag with no matching close is left untouched.
        let think_span =
            Regex::new(r"(?is)<think>.*?</think>").expect("Invalid think-span regex");
        Self { think_span }
    }

    /// Remove every `<think>...</think>` span and trim the result.
    ///
    /// Never fails; an empty string after stripping is a valid (if
    /// unhelpful) reply and is the caller's concern.
    pub fn sanitize(&self, raw: &str) -> String {
        self.think_span.replace_all(raw, "").trim().to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}
