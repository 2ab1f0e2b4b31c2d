//! Agent contract used by the dispatcher.

use crate::agent::domain::{AgentDomainError, AgentName, AgentState};
use crate::completion::ports::CompletionError;
use crate::task::domain::{Task, TaskAction, TaskOutcome};
use crate::tools::services::ToolLoopError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// A worker that executes one task at a time.
///
/// Implementations report domain failures through a failed
/// [`TaskOutcome`]; an [`AgentError`] means the agent could not run the task
/// at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Agent: Send + Sync {
    /// Returns the unique agent name.
    fn name(&self) -> &AgentName;

    /// Returns a snapshot of the agent status and counters.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::StateUnavailable`] when internal state cannot
    /// be read.
    fn state(&self) -> AgentResult<AgentState>;

    /// Returns `true` when the agent declares `action` as a capability.
    fn can_handle(&self, action: &TaskAction) -> bool;

    /// Executes `task` and returns its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Busy`] when another task is in flight, or
    /// [`AgentError::StateUnavailable`] when internal state cannot be
    /// updated.
    async fn execute_task(&self, task: &Task) -> AgentResult<TaskOutcome>;

    /// Discards the conversation log.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::StateUnavailable`] when internal state cannot
    /// be updated.
    fn reset_conversation(&self) -> AgentResult<()>;
}

/// Errors returned by agents.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    /// The agent is already working on a task.
    #[error("agent {0} is busy")]
    Busy(AgentName),

    /// The prompt for the task could not be produced.
    #[error(transparent)]
    Prompt(#[from] AgentDomainError),

    /// The completion gateway failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// A tool round trip was aborted.
    #[error(transparent)]
    ToolLoop(#[from] ToolLoopError),

    /// Internal state could not be accessed.
    #[error("agent state unavailable: {0}")]
    StateUnavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl AgentError {
    /// Wraps a state access failure.
    pub fn state_unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::StateUnavailable(Arc::new(err))
    }
}
