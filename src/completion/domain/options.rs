//! Per-request completion options.

use crate::config::GatewayConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool schema advertised to backends that support tool calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Human-readable purpose.
    pub description: String,
    /// JSON schema of the tool input.
    pub input_schema: Value,
}

/// Parameters of one completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// System prompt, if any.
    pub system_prompt: Option<String>,
    /// Tools the backend may request.
    pub tools: Vec<ToolDefinition>,
}

impl CompletionOptions {
    /// Creates options with no system prompt and no tools.
    #[must_use]
    pub fn new(model: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            temperature,
            system_prompt: None,
            tools: Vec::new(),
        }
    }

    /// Creates options from the gateway defaults.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.model.clone(), config.max_tokens, config.temperature)
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the advertised tools.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}
