//! Agent state snapshots and per-task history records.

use super::{AgentName, AgentStatus};
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Point-in-time view of an agent, published to the shared state store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    /// Agent name.
    pub id: AgentName,
    /// Agent role, such as `developer` or `tester`.
    #[serde(rename = "type")]
    pub role: String,
    /// Current status.
    pub status: AgentStatus,
    /// Task being executed, if any.
    pub current_task: Option<TaskId>,
    /// Number of successful tasks.
    pub results_count: usize,
    /// Number of failed tasks.
    pub errors_count: usize,
    /// Last status change.
    pub last_active: DateTime<Utc>,
}

/// Successful task recorded in an agent's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// Completed task.
    pub task_id: TaskId,
    /// Result payload returned for the task.
    pub result: Value,
    /// Completion time.
    pub timestamp: DateTime<Utc>,
}

/// Failed task recorded in an agent's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Failed task.
    pub task_id: TaskId,
    /// Failure description.
    pub error: String,
    /// Failure time.
    pub timestamp: DateTime<Utc>,
}
