//! Error types for agent domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing agent domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentDomainError {
    /// The agent name is empty after trimming.
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// The agent name contains characters outside `[a-z0-9_-]`.
    #[error("invalid agent name '{0}', expected characters in [a-z0-9_-]")]
    InvalidAgentName(String),

    /// The agent name exceeds the maximum length.
    #[error("agent name '{0}' exceeds 64 characters")]
    AgentNameTooLong(String),

    /// The agent name is reserved for the broadcast channel.
    #[error("agent name '{0}' is reserved")]
    ReservedAgentName(String),

    /// The agent role is empty after trimming.
    #[error("agent role must not be empty")]
    EmptyRole,

    /// A prompt template failed to render.
    #[error("prompt template for action '{action}' failed: {reason}")]
    TemplateRender {
        /// Action whose template failed.
        action: String,
        /// Renderer diagnostic.
        reason: String,
    },
}

/// Error returned while parsing agent statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent status: {0}")]
pub struct ParseAgentStatusError(pub String);
