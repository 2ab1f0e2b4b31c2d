//! Result envelope returned by agents.

use super::TaskId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope describing how an agent finished a task.
///
/// Serialises as `{success, result?, error?, taskId, filesModified?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutcome {
    /// Task the outcome belongs to.
    pub task_id: TaskId,
    /// Whether the agent completed the task.
    pub success: bool,
    /// Agent-specific result payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure description when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Files the agent asked to write while performing the task.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files_modified: Vec<String>,
}

impl TaskOutcome {
    /// Creates a successful outcome.
    #[must_use]
    pub const fn succeeded(task_id: TaskId, result: Value) -> Self {
        Self {
            task_id,
            success: true,
            result: Some(result),
            error: None,
            files_modified: Vec::new(),
        }
    }

    /// Creates a failed outcome.
    #[must_use]
    pub fn failed(task_id: TaskId, error: impl Into<String>) -> Self {
        Self {
            task_id,
            success: false,
            result: None,
            error: Some(error.into()),
            files_modified: Vec::new(),
        }
    }

    /// Sets the files modified while producing this outcome.
    #[must_use]
    pub fn with_files_modified(mut self, files: impl IntoIterator<Item = String>) -> Self {
        self.files_modified = files.into_iter().collect();
        self
    }

    /// Returns the failure text, or a generic message when none was given.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("task failed without an error message")
    }
}
