//! edupulse-providers: text-generation provider integrations.
//!
//! Implements the `TextGenerator` trait for Google Gemini, plus a mock
//! for tests, and loads the configuration that wires them up.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use config::{create_provider, load_config_from, EduPulseConfig, GeminiConfig};
pub use error::ProviderError;
