//! Per-step results.

use crate::task::domain::{StepId, TaskOutcome};
use serde::Serialize;
use serde_json::Value;

/// Entry of a workflow run result, one per executed step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    /// Step that ran.
    #[serde(rename = "step")]
    pub step_id: StepId,
    /// Whether the agent reported success.
    pub success: bool,
    /// Result payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    /// Builds the entry for `step_id` from its task outcome.
    #[must_use]
    pub fn from_outcome(step_id: StepId, outcome: &TaskOutcome) -> Self {
        Self {
            step_id,
            success: outcome.success,
            result: outcome.result.clone(),
            error: outcome.error.clone(),
        }
    }
}
