//! Records kept by the shared state store.

use super::StateMetrics;
use crate::agent::domain::{AgentName, AgentState};
use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Agent state as last published, with the publication time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStateEntry {
    /// Published state.
    #[serde(flatten)]
    pub state: AgentState,
    /// Time the store accepted the state.
    pub last_updated: DateTime<Utc>,
}

/// How a recorded task ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordedOutcome {
    /// The task completed with a result payload.
    Succeeded {
        /// Result payload.
        result: Value,
    },
    /// The task failed.
    Failed {
        /// Failure description.
        error: String,
    },
}

/// Entry of the completed-task history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTaskRecord {
    /// The task as it was recorded.
    pub task: Task,
    /// Success or failure details.
    pub outcome: RecordedOutcome,
    /// Time the record was appended.
    pub completed_at: DateTime<Utc>,
}

impl CompletedTaskRecord {
    /// Returns `true` for successful tasks.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, RecordedOutcome::Succeeded { .. })
    }
}

/// Consistent copy of the whole store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    /// Agent states by name.
    pub agents: BTreeMap<AgentName, AgentStateEntry>,
    /// Queued tasks, oldest first.
    pub task_queue: Vec<Task>,
    /// Completed-task history, oldest first.
    pub completed_tasks: Vec<CompletedTaskRecord>,
    /// Project key/value state.
    pub project_state: Map<String, Value>,
    /// Modified paths in first-seen order.
    pub modified_files: Vec<String>,
    /// Counters at snapshot time.
    pub metrics: StateMetrics,
    /// Time the snapshot was taken.
    pub taken_at: DateTime<Utc>,
}
