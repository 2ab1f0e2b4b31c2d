//! Environment-driven configuration for the completion gateway.
//!
//! | Variable             | Default                     |
//! |----------------------|-----------------------------|
//! | `LLM_PROVIDER`       | `ollama`                    |
//! | `OLLAMA_URL`         | `http://localhost:11434`    |
//! | `ANTHROPIC_API_KEY`  | required for `anthropic`    |
//! | `ANTHROPIC_BASE_URL` | `https://api.anthropic.com` |
//! | `LLM_MODEL`          | `deepseek-coder:33b`        |
//! | `MAX_TOKENS`         | `4096`                      |
//! | `TEMPERATURE`        | `0.7`                       |
//!
//! Blank values count as unset.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "deepseek-coder:33b";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Completion backend family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Local Ollama server.
    #[default]
    Ollama,
    /// Anthropic Messages API.
    Anthropic,
}

impl Provider {
    /// Returns the canonical provider name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(ConfigError::UnknownProvider(value.to_owned())),
        }
    }
}

/// Errors returned while reading gateway configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The provider name is not supported.
    #[error("unsupported completion provider '{0}', expected ollama or anthropic")]
    UnknownProvider(String),

    /// A numeric setting could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidNumber {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },

    /// The Anthropic provider was selected without an API key.
    #[error("ANTHROPIC_API_KEY must be set when LLM_PROVIDER is anthropic")]
    MissingApiKey,
}

/// Completion gateway settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Selected backend.
    pub provider: Provider,
    /// Ollama server base URL.
    pub ollama_url: String,
    /// Anthropic API base URL.
    pub anthropic_base_url: String,
    /// Anthropic API key.
    pub api_key: Option<String>,
    /// Default model.
    pub model: String,
    /// Default generation limit.
    pub max_tokens: u32,
    /// Default sampling temperature.
    pub temperature: f32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            ollama_url: DEFAULT_OLLAMA_URL.to_owned(),
            anthropic_base_url: DEFAULT_ANTHROPIC_BASE_URL.to_owned(),
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GatewayConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown providers, malformed numbers, or a
    /// missing Anthropic API key.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps variable names to
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unknown providers, malformed numbers, or a
    /// missing Anthropic API key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let provider = read("LLM_PROVIDER")
            .map(|value| value.parse::<Provider>())
            .transpose()?
            .unwrap_or(defaults.provider);
        let api_key = read("ANTHROPIC_API_KEY");
        if provider == Provider::Anthropic && api_key.is_none() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self {
            provider,
            ollama_url: read("OLLAMA_URL").unwrap_or(defaults.ollama_url),
            anthropic_base_url: read("ANTHROPIC_BASE_URL").unwrap_or(defaults.anthropic_base_url),
            api_key,
            model: read("LLM_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_number("MAX_TOKENS", read("MAX_TOKENS"), defaults.max_tokens)?,
            temperature: parse_number("TEMPERATURE", read("TEMPERATURE"), defaults.temperature)?,
        })
    }
}

fn parse_number<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    value.map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
    })
}
