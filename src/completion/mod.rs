//! Provider-agnostic completion gateway.
//!
//! A gateway turns an agent's conversation log and [`domain::CompletionOptions`]
//! into one request against a text-completion backend and returns the
//! canonical [`domain::CompletionResponse`]. Backends are adapters behind the
//! [`ports::CompletionGateway`] trait:
//!
//! - [`adapters::OllamaGateway`] for a local Ollama server
//! - [`adapters::AnthropicGateway`] for the Anthropic Messages API
//! - [`adapters::ScriptedCompletionGateway`] for deterministic runs
//!
//! Gateways issue exactly one request per call and never retry.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
