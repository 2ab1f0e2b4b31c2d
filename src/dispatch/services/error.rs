//! Dispatcher errors.

use crate::agent::domain::AgentName;
use crate::agent::ports::AgentError;
use crate::state::services::StateStoreError;
use crate::task::domain::TaskDomainError;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors returned by the dispatcher and agent registry.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// No agent is registered under the task's assigned name.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentName),

    /// An agent with the same name is already registered.
    #[error("agent already registered: {0}")]
    DuplicateAgent(AgentName),

    /// The task could not make the requested status transition.
    #[error(transparent)]
    Task(#[from] TaskDomainError),

    /// The agent could not run the task.
    #[error("agent {agent} failed: {source}")]
    Agent {
        /// Agent that failed.
        agent: AgentName,
        /// Agent error.
        source: AgentError,
    },

    /// The shared state store failed.
    #[error(transparent)]
    State(#[from] StateStoreError),

    /// The agent registry could not be accessed.
    #[error("agent registry unavailable: {0}")]
    RegistryUnavailable(Arc<dyn std::error::Error + Send + Sync>),
}
