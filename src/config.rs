//! TOML configuration.
//!
//! Every section and field has a default, so the programs run without a
//! config file. A file is read when `--config` names one, or when the
//! default path `./product-assistant.toml` exists.
//!
//! ```toml
//! [provider]
//! base_url = "https://api.openai.com/v1"
//! api_key_env = "OPENAI_API_KEY"
//!
//! [chat]
//! model = "gpt-3.5-turbo"
//! history = "sliding_window"
//! window_messages = 20
//!
//! [catalog]
//! path = "./products.json"
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use product_assistant_core::chat::{
    CompletionSettings, HistoryPolicy, DEFAULT_CHAT_MODEL, DEFAULT_MAX_TOKENS,
};
use product_assistant_core::index::DEFAULT_BATCH_SIZE;
use product_assistant_core::session::DEFAULT_TOP_K;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./product-assistant.toml";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// Connection settings shared by the chat and embedding clients.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries for 429, 5xx, and network errors. Zero disables retrying.
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    600
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// `"unbounded"` or `"sliding_window"`.
    #[serde(default = "default_history")]
    pub history: String,
    #[serde(default = "default_window_messages")]
    pub window_messages: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            history: default_history(),
            window_messages: default_window_messages(),
        }
    }
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_history() -> String {
    "unbounded".to_string()
}
fn default_window_messages() -> usize {
    20
}

impl ChatConfig {
    pub fn history_policy(&self) -> Result<HistoryPolicy> {
        match self.history.as_str() {
            "unbounded" => Ok(HistoryPolicy::Unbounded),
            "sliding_window" => Ok(HistoryPolicy::SlidingWindow {
                max_messages: self.window_messages,
            }),
            other => bail!(
                "Unknown chat.history: '{}'. Must be unbounded or sliding_window.",
                other
            ),
        }
    }

    pub fn completion_settings(&self) -> Result<CompletionSettings> {
        Ok(CompletionSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            history: self.history_policy()?,
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_embedding_model(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}
fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}
fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("./products.json")
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Read, parse, and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Resolve the effective config.
///
/// An explicit path must exist. Without one, the default path is used if
/// present and built-in defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.provider.base_url.trim().is_empty() {
        bail!("provider.base_url must not be empty");
    }
    if config.provider.api_key_env.trim().is_empty() {
        bail!("provider.api_key_env must not be empty");
    }

    if config.chat.max_tokens == 0 {
        bail!("chat.max_tokens must be > 0");
    }
    if !(0.0..=2.0).contains(&config.chat.temperature) {
        bail!("chat.temperature must be in [0.0, 2.0]");
    }
    if config.chat.history_policy()? != HistoryPolicy::Unbounded
        && config.chat.window_messages == 0
    {
        bail!("chat.window_messages must be >= 1 when history is 'sliding_window'");
    }

    if config.embedding.batch_size == 0 {
        bail!("embedding.batch_size must be > 0");
    }
    match config.embedding.provider.as_str() {
        "openai" => {}
        other => bail!("Unknown embedding provider: '{}'. Must be openai.", other),
    }

    if config.retrieval.top_k < 1 {
        bail!("retrieval.top_k must be >= 1");
    }

    Ok(())
}
