//! Task plans produced from requirements.

use crate::agent::domain::AgentName;
use crate::task::domain::{
    StepId, Task, TaskAction, TaskDomainError, TaskDraft, TaskKind, TaskMetadata,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One task proposed by a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedTask {
    /// Plan-local identifier used by dependencies.
    pub id: StepId,
    /// Task description.
    pub description: String,
    /// Agent to run the task.
    pub agent: AgentName,
    /// Requested action.
    pub action: TaskAction,
    /// Plan-local identifiers that must complete first.
    #[serde(default)]
    pub dependencies: Vec<StepId>,
    /// Action-specific metadata.
    #[serde(default)]
    pub metadata: Value,
}

impl PlannedTask {
    /// Builds a pending task of kind `planned`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidMetadata`] when the metadata is not
    /// an object.
    pub fn to_task(&self, clock: &impl Clock) -> Result<Task, TaskDomainError> {
        let metadata = TaskMetadata::from_value(self.metadata.clone())?;
        Ok(TaskDraft::new(
            TaskKind::Planned,
            self.action.clone(),
            self.description.clone(),
            self.agent.clone(),
        )
        .with_metadata(metadata)
        .with_dependencies(self.dependencies.iter().cloned())
        .build(clock))
    }
}

/// Structured plan returned by the planning prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPlan {
    /// Tasks in suggested execution order.
    #[serde(default)]
    pub tasks: Vec<PlannedTask>,
    /// Identified risks.
    #[serde(default)]
    pub risks: Vec<Value>,
    /// Free-form time estimate.
    #[serde(default)]
    pub estimated_time: Option<String>,
}
