//! Text-generation service boundary.
//!
//! Implemented by the `edupulse-providers` crate. The contract is a single
//! request/response exchange: a model identifier and a prompt go in,
//! generated text comes out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for LLM backends that turn a prompt into prose.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate text for a prompt.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;

    /// List models this provider is known to serve.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request to generate text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-3-flash-preview").
    pub model: String,
    /// The full prompt.
    pub prompt: String,
}

/// Response from a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text.
    pub content: String,
    /// Model that produced the text.
    pub model: String,
    /// Token usage, when the service reports it.
    #[serde(default)]
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}
