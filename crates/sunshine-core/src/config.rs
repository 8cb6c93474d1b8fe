use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SunshineError};

/// Top-level configuration for the Sunshine services.
///
/// Loaded from `~/.sunshine/config.toml` by default. Each section
/// corresponds to a subsystem or cross-cutting concern.
///
/// The inference API token is deliberately not part of this file; it is
/// read from the environment at startup and injected into the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunshineConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl Default for SunshineConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl SunshineConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SunshineConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SunshineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Assistant subsystem configuration.
///
/// Generation parameters are static per deployment; they are never derived
/// from conversation state or adjusted per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Whether the assistant is available at all.
    pub enabled: bool,
    /// Inference router base URL.
    pub base_url: String,
    /// Inference provider identifier on the router.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// Maximum number of prior turns included in the context window.
    pub context_turns: usize,
    /// Maximum user message length in characters.
    pub max_message_chars: usize,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    /// Frequency penalty.
    pub frequency_penalty: f32,
    /// Presence penalty.
    pub presence_penalty: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://router.huggingface.co".to_string(),
            provider: "nebius".to_string(),
            model: "openai/gpt-oss-120b".to_string(),
            context_turns: 10,
            max_message_chars: 2000,
            max_tokens: 1500,
            temperature: 0.7,
            top_p: 0.9,
            frequency_penalty: 0.1,
            presence_penalty: 0.1,
        }
    }
}
