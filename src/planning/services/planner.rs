//! Plans work with the completion gateway and dispatches the plan.

use crate::completion::domain::{CompletionOptions, ConversationLog};
use crate::completion::ports::{CompletionError, CompletionGateway};
use crate::dispatch::services::{DispatchError, TaskDispatcher};
use crate::planning::domain::{PlanParseError, TaskPlan, extract_plan};
use crate::task::domain::{StepId, TaskDomainError, TaskOutcome};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

const PLANNER_SYSTEM_PROMPT: &str = "You are the orchestrator agent coordinating a team of \
agents in a development workflow. Break requirements into small tasks, choose the right \
agent for each task (developer, tester, validator, documenter), respect dependencies and \
order the work so that every task can start once its dependencies are done.";

/// Result type for planning operations.
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Errors returned by [`Planner`].
#[derive(Debug, Clone, Error)]
pub enum PlanningError {
    /// The planning completion failed.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The completion did not contain a valid plan.
    #[error(transparent)]
    Parse(#[from] PlanParseError),

    /// A planned task could not be built.
    #[error("planned task {task} is invalid: {source}")]
    Task {
        /// Plan-local task identifier.
        task: StepId,
        /// Validation error.
        source: TaskDomainError,
    },

    /// A planned task could not be dispatched.
    #[error("planned task {task} could not be dispatched: {source}")]
    Dispatch {
        /// Plan-local task identifier.
        task: StepId,
        /// Dispatcher error.
        source: DispatchError,
    },
}

fn plan_prompt(requirements: &str) -> String {
    format!(
        "Analyze these requirements and create a detailed task plan:\n\n\
Requirements:\n{requirements}\n\n\
Please:\n\
1. Break down the requirements into specific tasks\n\
2. Assign each task to the appropriate agent (developer, tester, validator, documenter)\n\
3. Identify dependencies between tasks\n\
4. Suggest the order of execution\n\
5. Identify any risks or challenges\n\n\
Respond with a structured plan in JSON format:\n\
{{\n  \"tasks\": [\n    {{\n      \"id\": \"task-1\",\n      \"description\": \"...\",\n      \
\"agent\": \"developer\",\n      \"action\": \"implement-feature\",\n      \
\"dependencies\": [],\n      \"metadata\": {{}}\n    }}\n  ],\n  \"risks\": [],\n  \
\"estimatedTime\": \"...\"\n}}"
    )
}

/// Turns requirements into a task plan and runs it.
pub struct Planner<C>
where
    C: Clock + Send + Sync,
{
    gateway: Arc<dyn CompletionGateway>,
    dispatcher: Arc<TaskDispatcher<C>>,
    options: CompletionOptions,
    clock: Arc<C>,
}

impl<C> Planner<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a planner. The planning system prompt replaces any prompt in
    /// `options`.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        dispatcher: Arc<TaskDispatcher<C>>,
        options: CompletionOptions,
        clock: Arc<C>,
    ) -> Self {
        Self {
            gateway,
            dispatcher,
            options: options.with_system_prompt(PLANNER_SYSTEM_PROMPT),
            clock,
        }
    }

    /// Asks the gateway for a plan covering `requirements`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Completion`] when the gateway fails, or
    /// [`PlanningError::Parse`] when the reply holds no valid plan.
    pub async fn plan(&self, requirements: &str) -> PlanningResult<TaskPlan> {
        let mut log = ConversationLog::new();
        log.push_user_text(plan_prompt(requirements));
        debug!(model = %self.options.model, "requesting task plan");
        let response = self
            .gateway
            .complete(&log, &self.options)
            .await
            .inspect_err(|err| error!(error = %err, "plan completion failed"))?;
        let plan = extract_plan(&response.text_content())?;
        info!(tasks = plan.tasks.len(), "task plan received");
        Ok(plan)
    }

    /// Dispatches the planned tasks in order and returns their outcomes.
    ///
    /// Tasks whose dependencies did not succeed earlier in this run are
    /// skipped. Failed tasks are logged and never retried.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Task`] for invalid planned tasks, or
    /// [`PlanningError::Dispatch`] when a task cannot be dispatched.
    pub async fn execute_plan(&self, plan: &TaskPlan) -> PlanningResult<Vec<TaskOutcome>> {
        let mut outcomes = Vec::with_capacity(plan.tasks.len());
        let mut completed: BTreeSet<StepId> = BTreeSet::new();

        for planned in &plan.tasks {
            if !planned
                .dependencies
                .iter()
                .all(|dependency| completed.contains(dependency))
            {
                warn!(task = %planned.id, "skipping planned task, dependencies not met");
                continue;
            }

            let mut task = planned
                .to_task(self.clock.as_ref())
                .map_err(|source| PlanningError::Task {
                    task: planned.id.clone(),
                    source,
                })?;
            let outcome = self
                .dispatcher
                .assign_task(&mut task)
                .await
                .map_err(|source| PlanningError::Dispatch {
                    task: planned.id.clone(),
                    source,
                })?;

            if outcome.success {
                completed.insert(planned.id.clone());
            } else {
                error!(
                    task = %planned.id,
                    description = %planned.description,
                    error = outcome.error_message(),
                    "planned task failed"
                );
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
