//! Configuration management for sousd.
//!
//! Loads settings from /etc/sous/config.toml or uses defaults. The
//! upstream API credential is taken from the environment once at
//! startup; the daemon refuses to start without it.

use serde::{Deserialize, Serialize};
use sous_common::SuggestError;
use std::fmt;
use std::fs;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/sous/config.toml";

/// Environment variable holding the upstream API credential
pub const API_KEY_ENV: &str = "SOUS_API_KEY";

/// Which wire shape the upstream model speaks.
///
/// The extraction strategy follows the shape: chat upstreams are
/// expected to return pure JSON (strict parse), completion upstreams
/// wrap the array in prose (bracket scan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpstreamKind {
    /// OpenAI-style chat completions (system + user messages)
    OpenAiChat,
    /// Hugging-Face-style raw text generation
    Completion,
}

impl fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamKind::OpenAiChat => write!(f, "openai-chat"),
            UpstreamKind::Completion => write!(f, "completion"),
        }
    }
}

/// Upstream model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_kind")]
    pub kind: UpstreamKind,

    /// Base URL of the provider API. For openai-chat the client
    /// appends /chat/completions; for completion it posts here as-is.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, fixed per deployment rather than
    /// caller-supplied.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on generated tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,
}

fn default_upstream_kind() -> UpstreamKind {
    UpstreamKind::OpenAiChat
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    900
}

fn default_upstream_timeout() -> u64 {
    60
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            kind: default_upstream_kind(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_upstream_timeout(),
        }
    }
}

/// Per-peer rate limiting, disabled unless switched on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_rate_limit_requests")]
    pub max_requests: usize,

    #[serde(default = "default_rate_limit_window")]
    pub window_secs: u64,
}

fn default_rate_limit_requests() -> usize {
    30
}

fn default_rate_limit_window() -> u64 {
    60
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_requests: default_rate_limit_requests(),
            window_secs: default_rate_limit_window(),
        }
    }
}

/// Retry with fixed backoff for transient upstream failures,
/// disabled unless switched on (the default matches the reference
/// behavior of exactly one attempt).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_retry_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_backoff")]
    pub backoff_ms: u64,
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    500
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: default_retry_attempts(),
            backoff_ms: default_retry_backoff(),
        }
    }
}

/// LRU cache of successful responses keyed by trimmed prompt,
/// disabled unless switched on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_capacity() -> usize {
    128
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            capacity: default_cache_capacity(),
        }
    }
}

/// Optional policies layered around the suggestion engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    // Localhost only unless the operator opens it up
    "127.0.0.1:7871".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub policies: PolicyConfig,
}

impl Config {
    /// Load config from file, or return defaults
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_PATH).unwrap_or_else(|e| {
            warn!("Config not found, using defaults: {}", e);
            Config::default()
        })
    }

    /// Load config from specific path
    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }
}

/// Resolve the upstream credential from the process environment.
///
/// Called once at startup; routes never re-read the environment.
pub fn api_key_from_env() -> Result<String, SuggestError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(SuggestError::Configuration(format!(
            "{} is not set",
            API_KEY_ENV
        ))),
    }
}
