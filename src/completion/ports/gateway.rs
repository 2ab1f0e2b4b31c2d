//! Completion gateway port.

use crate::completion::domain::{
    CompletionOptions, CompletionResponse, ConversationLog, HealthReport,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for completion gateway operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Single-request completion contract.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends the conversation to the backend and returns its response.
    ///
    /// Implementations issue exactly one request and never retry.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] when the request cannot be sent, the
    /// backend answers with a non-success status, or the body cannot be
    /// decoded.
    async fn complete(
        &self,
        log: &ConversationLog,
        options: &CompletionOptions,
    ) -> CompletionResult<CompletionResponse>;

    /// Checks the backend. Failures are reported inside the returned value.
    async fn health_check(&self) -> HealthReport;
}

/// Errors returned by completion gateways.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// The backend answered with a non-success HTTP status.
    #[error("completion backend returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("completion transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body did not match the expected shape.
    #[error("failed to decode completion response: {0}")]
    Decode(String),

    /// The gateway is not configured for the request.
    #[error("completion gateway misconfigured: {0}")]
    Configuration(String),

    /// A scripted gateway has no responses left.
    #[error("no scripted completion responses remain")]
    ScriptExhausted,
}

impl CompletionError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
