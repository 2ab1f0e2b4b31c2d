//! Routes tasks to agents and records their outcomes.

use super::{AgentRegistry, DispatchError, DispatchResult};
use crate::agent::domain::{AgentName, AgentState};
use crate::agent::ports::Agent;
use crate::message::domain::{MessageKind, OutboundMessage};
use crate::message::services::MessageBus;
use crate::state::services::SharedStateStore;
use crate::task::domain::{Task, TaskOutcome, TaskStatus};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of one task drained from the queue.
#[derive(Debug, Clone)]
pub struct QueuedTaskReport {
    /// The task after dispatch.
    pub task: Task,
    /// The outcome, or the error that prevented one.
    pub outcome: DispatchResult<TaskOutcome>,
}

/// Routes tasks to registered agents.
///
/// Agent failures reported as outcomes are returned unchanged. Bus delivery
/// errors are logged and never change an outcome.
pub struct TaskDispatcher<C>
where
    C: Clock + Send + Sync,
{
    registry: AgentRegistry,
    store: SharedStateStore<C>,
    bus: MessageBus<C>,
    clock: Arc<C>,
}

impl<C> TaskDispatcher<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher with an empty registry.
    #[must_use]
    pub fn new(store: SharedStateStore<C>, bus: MessageBus<C>, clock: Arc<C>) -> Self {
        Self {
            registry: AgentRegistry::new(),
            store,
            bus,
            clock,
        }
    }

    /// Returns the shared state store.
    #[must_use]
    pub const fn store(&self) -> &SharedStateStore<C> {
        &self.store
    }

    /// Returns the message bus.
    #[must_use]
    pub const fn bus(&self) -> &MessageBus<C> {
        &self.bus
    }

    /// Returns the agent registry.
    #[must_use]
    pub const fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Registers `agent` and publishes its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DuplicateAgent`] when the name is taken, or
    /// a state error when the initial state cannot be published.
    pub fn register_agent(&self, agent: Arc<dyn Agent>) -> DispatchResult<()> {
        self.registry.register(Arc::clone(&agent))?;
        info!(agent = %agent.name(), "agent registered");
        self.publish_state(agent.as_ref())
    }

    /// Returns the current state of every registered agent.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the registry or an agent's state cannot
    /// be read.
    pub fn agents_status(&self) -> DispatchResult<Vec<AgentState>> {
        self.registry
            .all()?
            .iter()
            .map(|agent| agent_state(agent.as_ref()))
            .collect()
    }

    /// Runs `task` on its assigned agent and records the outcome.
    ///
    /// The task moves to `in_progress`, then to `completed` or `failed`
    /// according to the outcome, which is also attached to the task.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::AgentNotFound`] without touching the task
    /// when no agent has the assigned name. Returns
    /// [`DispatchError::Agent`] when the agent cannot run the task; the task
    /// is then marked failed and recorded as such.
    pub async fn assign_task(&self, task: &mut Task) -> DispatchResult<TaskOutcome> {
        let agent_name = task.assigned_agent().clone();
        let agent = self
            .registry
            .get(&agent_name)?
            .ok_or_else(|| DispatchError::AgentNotFound(agent_name.clone()))?;

        task.start(self.clock.as_ref())?;
        info!(task_id = %task.id(), agent = %agent_name, action = %task.action(), "task assigned");
        self.notify(OutboundMessage::new(
            AgentName::orchestrator(),
            agent_name.clone(),
            MessageKind::Task,
            json!({
                "taskId": task.id(),
                "action": task.action(),
                "description": task.description(),
            }),
        ));

        let outcome = match agent.execute_task(task).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(task_id = %task.id(), agent = %agent_name, error = %err, "agent could not run task");
                task.finish(TaskOutcome::failed(task.id(), err.to_string()), self.clock.as_ref())?;
                self.store.fail_task(task.clone(), err.to_string())?;
                self.publish_state(agent.as_ref())?;
                return Err(DispatchError::Agent {
                    agent: agent_name,
                    source: err,
                });
            }
        };

        let status = task.finish(outcome.clone(), self.clock.as_ref())?;
        if status == TaskStatus::Completed {
            self.store
                .complete_task(task.clone(), outcome.result.clone().unwrap_or_default())?;
            for path in &outcome.files_modified {
                self.store.add_modified_file(path.clone())?;
            }
        } else {
            self.store
                .fail_task(task.clone(), outcome.error_message().to_owned())?;
        }
        self.publish_state(agent.as_ref())?;

        let kind = if outcome.success {
            MessageKind::Result
        } else {
            MessageKind::Error
        };
        self.notify(OutboundMessage::broadcast(agent_name, kind, json!(outcome)));
        Ok(outcome)
    }

    /// Appends `task` to the shared queue.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::State`] when the store is unavailable.
    pub fn submit(&self, task: Task) -> DispatchResult<()> {
        Ok(self.store.add_task(task)?)
    }

    /// Dispatches queued tasks in FIFO order until the queue is empty.
    ///
    /// A failing task does not stop the drain; its error is kept in the
    /// report.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::State`] when the queue cannot be read.
    pub async fn process_queue(&self) -> DispatchResult<Vec<QueuedTaskReport>> {
        let mut reports = Vec::new();
        while let Some(mut task) = self.store.get_next_task()? {
            let outcome = self.assign_task(&mut task).await;
            if let Err(err) = &outcome {
                warn!(task_id = %task.id(), error = %err, "queued task not completed");
            }
            reports.push(QueuedTaskReport { task, outcome });
        }
        info!(processed = reports.len(), "queue drained");
        Ok(reports)
    }

    fn publish_state(&self, agent: &dyn Agent) -> DispatchResult<()> {
        self.store.update_agent_state(agent_state(agent)?)?;
        Ok(())
    }

    fn notify(&self, message: OutboundMessage) {
        if let Err(err) = self.bus.send(message) {
            warn!(error = %err, "bus delivery failed");
        }
    }
}

fn agent_state(agent: &dyn Agent) -> DispatchResult<AgentState> {
    agent.state().map_err(|source| DispatchError::Agent {
        agent: agent.name().clone(),
        source,
    })
}
