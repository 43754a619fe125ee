use crate::error::{Error, Result};
use crate::llm::Provider;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub artic: ArticConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Art Institute of Chicago public API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticConfig {
    #[serde(default = "default_artic_base_url")]
    pub base_url: String,
    /// Upper bound on exhibitions requested per search.
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ArticConfig {
    fn default() -> Self {
        Self {
            base_url: default_artic_base_url(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ArticConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            base_url: None,
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// Defaults
fn default_artic_base_url() -> String {
    std::env::var("ARTIC_BASE_URL").unwrap_or_else(|_| "https://api.artic.edu/api/v1".into())
}
fn default_limit() -> u32 {
    100
}
fn default_timeout_secs() -> u64 {
    180
}
fn default_model() -> String {
    "gemma3:1b".into()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.artic.limit == 0 {
            return Err(Error::config("artic.limit must be at least 1"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        Ok(())
    }
}
