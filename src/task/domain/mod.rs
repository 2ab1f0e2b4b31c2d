//! Domain model for orchestrated tasks.
//!
//! The task domain covers identifiers, status transitions, the metadata
//! union attached to each task, and the outcome envelope agents return.

mod error;
mod ids;
mod metadata;
mod outcome;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{StepId, TaskAction, TaskId};
pub use metadata::{TaskMetadata, WorkflowContext};
pub use outcome::TaskOutcome;
pub use task::{Task, TaskDraft, TaskKind, TaskStatus};
