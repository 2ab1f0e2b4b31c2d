//! In-memory shared state store.

use crate::agent::domain::{AgentName, AgentState};
use crate::state::domain::{
    AgentStateEntry, CompletedTaskRecord, RecordedOutcome, StateMetrics, StateSnapshot,
};
use crate::task::domain::Task;
use mockable::Clock;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, error, info};

/// Result type for state store operations.
pub type StateStoreResult<T> = Result<T, StateStoreError>;

/// Errors returned by [`SharedStateStore`].
#[derive(Debug, Clone, Error)]
pub enum StateStoreError {
    /// Internal state could not be accessed.
    #[error("shared state unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

fn unavailable(err: impl std::fmt::Display) -> StateStoreError {
    StateStoreError::Unavailable(Arc::new(std::io::Error::other(err.to_string())))
}

#[derive(Debug, Default)]
struct SharedState {
    agents: BTreeMap<AgentName, AgentStateEntry>,
    task_queue: VecDeque<Task>,
    completed_tasks: Vec<CompletedTaskRecord>,
    project_state: Map<String, Value>,
    modified_files: Vec<String>,
    tasks_completed: u64,
    tasks_failed: u64,
}

impl SharedState {
    fn metrics(&self) -> StateMetrics {
        StateMetrics {
            tasks_completed: self.tasks_completed,
            tasks_failed: self.tasks_failed,
            task_queue_length: self.task_queue.len(),
            completed_tasks_count: self.completed_tasks.len(),
            active_agents: self.agents.len(),
        }
    }
}

/// Process-wide aggregate of orchestration state.
///
/// Clones share the same underlying state.
pub struct SharedStateStore<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<SharedState>>,
    clock: Arc<C>,
}

impl<C> Clone for SharedStateStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> SharedStateStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SharedState::default())),
            clock,
        }
    }

    /// Replaces the stored state of `state.id` and stamps it.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn update_agent_state(&self, state: AgentState) -> StateStoreResult<()> {
        let last_updated = self.clock.utc();
        debug!(agent = %state.id, status = %state.status, "agent state updated");
        let mut shared = self.state.write().map_err(unavailable)?;
        shared.agents.insert(
            state.id.clone(),
            AgentStateEntry {
                state,
                last_updated,
            },
        );
        Ok(())
    }

    /// Returns the last published state of `agent`.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn agent_state(&self, agent: &AgentName) -> StateStoreResult<Option<AgentStateEntry>> {
        let shared = self.state.read().map_err(unavailable)?;
        Ok(shared.agents.get(agent).cloned())
    }

    /// Returns every published agent state, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn all_agent_states(&self) -> StateStoreResult<Vec<AgentStateEntry>> {
        let shared = self.state.read().map_err(unavailable)?;
        Ok(shared.agents.values().cloned().collect())
    }

    /// Appends `task` to the queue.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn add_task(&self, task: Task) -> StateStoreResult<()> {
        info!(task_id = %task.id(), description = task.description(), "task queued");
        let mut shared = self.state.write().map_err(unavailable)?;
        shared.task_queue.push_back(task);
        Ok(())
    }

    /// Removes and returns the oldest queued task, or `None` when the queue
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn get_next_task(&self) -> StateStoreResult<Option<Task>> {
        let mut shared = self.state.write().map_err(unavailable)?;
        Ok(shared.task_queue.pop_front())
    }

    /// Records `task` as completed with `result`.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn complete_task(&self, task: Task, result: Value) -> StateStoreResult<()> {
        info!(task_id = %task.id(), description = task.description(), "task completed");
        self.record(task, RecordedOutcome::Succeeded { result })
    }

    /// Records `task` as failed with `error`.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn fail_task(&self, task: Task, error: impl Into<String>) -> StateStoreResult<()> {
        let message = error.into();
        error!(task_id = %task.id(), description = task.description(), error = %message, "task failed");
        self.record(task, RecordedOutcome::Failed { error: message })
    }

    fn record(&self, task: Task, outcome: RecordedOutcome) -> StateStoreResult<()> {
        let completed_at = self.clock.utc();
        let mut shared = self.state.write().map_err(unavailable)?;
        match outcome {
            RecordedOutcome::Succeeded { .. } => {
                shared.tasks_completed = shared.tasks_completed.saturating_add(1);
            }
            RecordedOutcome::Failed { .. } => {
                shared.tasks_failed = shared.tasks_failed.saturating_add(1);
            }
        }
        shared.completed_tasks.push(CompletedTaskRecord {
            task,
            outcome,
            completed_at,
        });
        Ok(())
    }

    /// Returns the completed-task history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn completed_tasks(&self) -> StateStoreResult<Vec<CompletedTaskRecord>> {
        let shared = self.state.read().map_err(unavailable)?;
        Ok(shared.completed_tasks.clone())
    }

    /// Adds `path` to the modified-file set unless already present.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn add_modified_file(&self, path: impl Into<String>) -> StateStoreResult<()> {
        let candidate = path.into();
        let mut shared = self.state.write().map_err(unavailable)?;
        if !shared.modified_files.contains(&candidate) {
            shared.modified_files.push(candidate);
        }
        Ok(())
    }

    /// Returns modified paths in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn modified_files(&self) -> StateStoreResult<Vec<String>> {
        let shared = self.state.read().map_err(unavailable)?;
        Ok(shared.modified_files.clone())
    }

    /// Empties the modified-file set.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn clear_modified_files(&self) -> StateStoreResult<()> {
        let mut shared = self.state.write().map_err(unavailable)?;
        shared.modified_files.clear();
        Ok(())
    }

    /// Sets one project state key.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn update_project_state(&self, key: impl Into<String>, value: Value) -> StateStoreResult<()> {
        let mut shared = self.state.write().map_err(unavailable)?;
        shared.project_state.insert(key.into(), value);
        Ok(())
    }

    /// Returns the project state map.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn project_state(&self) -> StateStoreResult<Map<String, Value>> {
        let shared = self.state.read().map_err(unavailable)?;
        Ok(shared.project_state.clone())
    }

    /// Returns the current counters.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn metrics(&self) -> StateStoreResult<StateMetrics> {
        let shared = self.state.read().map_err(unavailable)?;
        Ok(shared.metrics())
    }

    /// Copies the whole store under one lock acquisition.
    ///
    /// # Errors
    ///
    /// Returns [`StateStoreError::Unavailable`] when lock acquisition fails.
    pub fn snapshot(&self) -> StateStoreResult<StateSnapshot> {
        let taken_at = self.clock.utc();
        let shared = self.state.read().map_err(unavailable)?;
        Ok(StateSnapshot {
            agents: shared.agents.clone(),
            task_queue: shared.task_queue.iter().cloned().collect(),
            completed_tasks: shared.completed_tasks.clone(),
            project_state: shared.project_state.clone(),
            modified_files: shared.modified_files.clone(),
            metrics: shared.metrics(),
            taken_at,
        })
    }
}
