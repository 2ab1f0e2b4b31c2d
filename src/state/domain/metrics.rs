//! Derived counters.

use serde::Serialize;

/// Counters derived from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMetrics {
    /// Tasks recorded as completed.
    pub tasks_completed: u64,
    /// Tasks recorded as failed.
    pub tasks_failed: u64,
    /// Tasks waiting in the queue.
    pub task_queue_length: usize,
    /// Entries in the completed-task history.
    pub completed_tasks_count: usize,
    /// Agents with a published state.
    pub active_agents: usize,
}

impl StateMetrics {
    /// Returns completed tasks as a fraction of all finished tasks.
    ///
    /// Returns `None` before any task has finished.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "success rate is a reporting ratio; counters stay far below 2^52"
    )]
    pub fn success_rate(&self) -> Option<f64> {
        let finished = self.tasks_completed.saturating_add(self.tasks_failed);
        (finished > 0).then(|| self.tasks_completed as f64 / finished as f64)
    }
}
