//! Completion backend adapters.

mod anthropic;
mod ollama;
mod scripted;

pub use anthropic::AnthropicGateway;
pub use ollama::OllamaGateway;
pub use scripted::{RecordedRequest, ScriptedCompletionGateway};

use crate::completion::ports::{CompletionError, CompletionGateway, CompletionResult};
use crate::config::{GatewayConfig, Provider};
use std::sync::Arc;

/// Builds the gateway selected by `config`.
///
/// # Errors
///
/// Returns [`CompletionError::Configuration`] when the Anthropic provider is
/// selected without an API key.
pub fn gateway_from_config(config: &GatewayConfig) -> CompletionResult<Arc<dyn CompletionGateway>> {
    match config.provider {
        Provider::Ollama => Ok(Arc::new(OllamaGateway::new(config.ollama_url.clone()))),
        Provider::Anthropic => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                CompletionError::Configuration("missing Anthropic API key".to_owned())
            })?;
            Ok(Arc::new(AnthropicGateway::new(
                config.anthropic_base_url.clone(),
                api_key,
            )))
        }
    }
}
