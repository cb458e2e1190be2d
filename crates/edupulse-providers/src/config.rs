//! Provider configuration and factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use edupulse_core::traits::TextGenerator;

use crate::gemini::GeminiProvider;

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["EDUPULSE_API_KEY", "API_KEY"];

/// Gemini connection settings.
///
/// Note: Custom Debug impl masks the API key to prevent accidental exposure in logs.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "***" };
        f.debug_struct("GeminiConfig")
            .field("api_key", &key)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Top-level edupulse configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EduPulseConfig {
    /// Gemini connection settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Model used for insights.
    #[serde(default = "default_model")]
    pub model: String,
    /// Whether to request insights at all.
    #[serde(default = "default_insights")]
    pub insights: bool,
    /// Give up on an insight request after this many seconds. Unset means wait.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_insights() -> bool {
    true
}

impl Default for EduPulseConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            model: default_model(),
            insights: default_insights(),
            request_timeout_secs: None,
        }
    }
}

impl EduPulseConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn has_credential(&self) -> bool {
        !self.gemini.api_key.trim().is_empty()
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Fill the API key from the environment.
///
/// The first variable in [`API_KEY_ENV_VARS`] that is set and non-empty wins
/// over the file value.
fn apply_env_overrides(config: &mut EduPulseConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = API_KEY_ENV_VARS
        .iter()
        .filter_map(|&name| lookup(name))
        .find(|v| !v.trim().is_empty())
    {
        config.gemini.api_key = key;
    }
}

/// Load config from an explicit path, or search the well-known locations.
///
/// Search order without a path:
/// 1. `edupulse.toml` in the current directory
/// 2. `~/.config/edupulse/config.toml`
///
/// Environment variable overrides: `EDUPULSE_API_KEY`, then `API_KEY`.
pub fn load_config_from(path: Option<&Path>) -> Result<EduPulseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("edupulse.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<EduPulseConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EduPulseConfig::default(),
    };

    config.gemini.api_key = resolve_env_vars(&config.gemini.api_key);
    config.gemini.base_url = config.gemini.base_url.as_deref().map(resolve_env_vars);
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("edupulse"))
}

/// Create the text generator described by the configuration.
///
/// A missing key is not an error here; the provider reports it per call so
/// the insight panel can fall back without blocking anything else.
pub fn create_provider(config: &EduPulseConfig) -> Box<dyn TextGenerator> {
    Box::new(GeminiProvider::new(
        &config.gemini.api_key,
        config.gemini.base_url.clone(),
    ))
}
