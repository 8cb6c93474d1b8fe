//! Shared foundation for the Sunshine volunteer-care platform services.
//!
//! Provides the top-level error type and TOML configuration loading used
//! by the assistant subsystem and the application binary.

pub mod config;
pub mod error;

pub use config::{AssistantConfig, GeneralConfig, SunshineConfig};
pub use error::{Result, SunshineError};
