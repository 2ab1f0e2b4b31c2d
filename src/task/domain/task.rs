//! Task aggregate and lifecycle status.

use super::{
    ParseTaskStatusError, StepId, TaskAction, TaskDomainError, TaskId, TaskMetadata, TaskOutcome,
};
use crate::agent::domain::AgentName;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but not yet dispatched.
    Pending,
    /// Task is executing on its agent.
    InProgress,
    /// Agent reported success.
    Completed,
    /// Agent reported failure, or dispatch aborted.
    Failed,
    /// Task is waiting on something outside the run.
    Blocked,
}

impl TaskStatus {
    /// Returns the canonical text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Blocked => "blocked",
        }
    }

    /// Returns `true` for statuses with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns `true` when moving from `self` to `target` is permitted.
    ///
    /// Statuses only move forward: a task never returns to `pending`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::InProgress | Self::Blocked)
                | (Self::Blocked, Self::InProgress)
                | (Self::InProgress, Self::Completed | Self::Failed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "blocked" => Ok(Self::Blocked),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Where a task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    /// Created from a workflow step.
    WorkflowStep,
    /// Created from a generated task plan.
    Planned,
    /// Submitted directly by a caller.
    Adhoc,
}

impl TaskKind {
    /// Returns the canonical text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkflowStep => "workflow-step",
            Self::Planned => "planned",
            Self::Adhoc => "adhoc",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for new tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    kind: TaskKind,
    action: TaskAction,
    description: String,
    assigned_agent: AgentName,
    metadata: TaskMetadata,
    dependencies: Vec<StepId>,
}

impl TaskDraft {
    /// Creates a draft with required fields.
    #[must_use]
    pub fn new(
        kind: TaskKind,
        action: TaskAction,
        description: impl Into<String>,
        assigned_agent: AgentName,
    ) -> Self {
        Self {
            kind,
            action,
            description: description.into(),
            assigned_agent,
            metadata: TaskMetadata::Empty,
            dependencies: Vec::new(),
        }
    }

    /// Sets task metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TaskMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets dependency identifiers.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = StepId>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Stamps a fresh identifier and creation time and returns a pending task.
    #[must_use]
    pub fn build(self, clock: &impl Clock) -> Task {
        let timestamp = clock.utc();
        Task {
            id: TaskId::new(),
            kind: self.kind,
            action: self.action,
            description: self.description,
            status: TaskStatus::Pending,
            assigned_agent: self.assigned_agent,
            metadata: self.metadata,
            dependencies: self.dependencies,
            created_at: timestamp,
            updated_at: timestamp,
            result: None,
        }
    }
}

/// Task aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    #[serde(rename = "type")]
    kind: TaskKind,
    action: TaskAction,
    description: String,
    status: TaskStatus,
    assigned_agent: AgentName,
    metadata: TaskMetadata,
    dependencies: Vec<StepId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    result: Option<TaskOutcome>,
}

impl Task {
    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns where the task came from.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the requested action.
    #[must_use]
    pub const fn action(&self) -> &TaskAction {
        &self.action
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the agent the task is routed to.
    #[must_use]
    pub const fn assigned_agent(&self) -> &AgentName {
        &self.assigned_agent
    }

    /// Returns the task metadata.
    #[must_use]
    pub const fn metadata(&self) -> &TaskMetadata {
        &self.metadata
    }

    /// Returns the declared dependency identifiers.
    #[must_use]
    pub fn dependencies(&self) -> &[StepId] {
        &self.dependencies
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the attached outcome once the task has finished.
    #[must_use]
    pub const fn result(&self) -> Option<&TaskOutcome> {
        self.result.as_ref()
    }

    /// Marks the task as executing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the task
    /// is pending or blocked.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::InProgress, clock)
    }

    /// Marks a pending task as blocked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] unless the task
    /// is pending.
    pub fn block(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Blocked, clock)
    }

    /// Attaches the agent outcome and moves to `completed` or `failed`.
    ///
    /// Returns the resulting status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::OutcomeMismatch`] when the outcome belongs
    /// to another task, or [`TaskDomainError::InvalidStatusTransition`] when
    /// the task is not in progress.
    pub fn finish(
        &mut self,
        outcome: TaskOutcome,
        clock: &impl Clock,
    ) -> Result<TaskStatus, TaskDomainError> {
        if outcome.task_id != self.id {
            return Err(TaskDomainError::OutcomeMismatch {
                task_id: self.id,
                outcome_task: outcome.task_id,
            });
        }
        let target = if outcome.success {
            TaskStatus::Completed
        } else {
            TaskStatus::Failed
        };
        self.transition_to(target, clock)?;
        self.result = Some(outcome);
        Ok(target)
    }

    fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
