//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A step identifier is empty after trimming.
    #[error("step identifier must not be empty")]
    EmptyStepId,

    /// A step identifier contains whitespace.
    #[error("invalid step identifier '{0}', whitespace is not allowed")]
    InvalidStepId(String),

    /// A task action is empty after trimming.
    #[error("task action must not be empty")]
    EmptyAction,

    /// Metadata did not match any supported shape.
    #[error("invalid task metadata: {0}")]
    InvalidMetadata(String),

    /// The requested status transition is not permitted.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Task being transitioned.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// An outcome was recorded against a different task.
    #[error("outcome for task {outcome_task} cannot be attached to task {task_id}")]
    OutcomeMismatch {
        /// Task receiving the outcome.
        task_id: TaskId,
        /// Task the outcome was produced for.
        outcome_task: TaskId,
    },
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
