//! Sequential workflow executor.

use crate::dispatch::services::{DispatchError, TaskDispatcher};
use crate::task::domain::{StepId, WorkflowContext};
use crate::workflow::domain::{StepResult, WorkflowCatalog, WorkflowDefinitionError, WorkflowStep};
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Result type for workflow runs.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors that abort a workflow run.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// No workflow has the requested name.
    #[error("workflow not found: {0}")]
    WorkflowNotFound(String),

    /// A required step reported failure.
    #[error("required step failed: {description} ({step}): {reason}")]
    RequiredStepFailed {
        /// Failing step.
        step: StepId,
        /// Step description.
        description: String,
        /// Failure reported by the agent.
        reason: String,
    },

    /// A required step could not be dispatched.
    #[error("step {step} could not be dispatched: {source}")]
    Dispatch {
        /// Failing step.
        step: StepId,
        /// Dispatcher error.
        source: DispatchError,
    },

    /// The workflow definition is invalid.
    #[error(transparent)]
    Definition(#[from] WorkflowDefinitionError),
}

/// Runs workflow steps one at a time through a [`TaskDispatcher`].
pub struct WorkflowExecutor<C>
where
    C: Clock + Send + Sync,
{
    dispatcher: Arc<TaskDispatcher<C>>,
    clock: Arc<C>,
}

impl<C> WorkflowExecutor<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an executor.
    #[must_use]
    pub const fn new(dispatcher: Arc<TaskDispatcher<C>>, clock: Arc<C>) -> Self {
        Self { dispatcher, clock }
    }

    /// Runs the workflow called `name` from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::WorkflowNotFound`] for unknown names, and
    /// otherwise the errors of [`Self::execute_steps`].
    pub async fn execute_named(
        &self,
        catalog: &WorkflowCatalog,
        name: &str,
        context: WorkflowContext,
    ) -> WorkflowResult<Vec<StepResult>> {
        let definition = catalog
            .get(name)
            .ok_or_else(|| WorkflowError::WorkflowNotFound(name.to_owned()))?;
        info!(workflow = name, steps = definition.steps().len(), "starting workflow");
        let results = self.execute_steps(definition.steps(), context).await?;
        info!(workflow = name, executed = results.len(), "workflow completed");
        Ok(results)
    }

    /// Runs `steps` in declared order and returns one entry per executed
    /// step.
    ///
    /// A step runs only when all of its dependencies completed earlier in
    /// this run; otherwise it is skipped without an entry. A successful step
    /// with an `onSuccess` hook stores its result as the context's previous
    /// result. Optional step failures are logged and the run continues.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::RequiredStepFailed`] when a required step
    /// reports failure, or [`WorkflowError::Dispatch`] when a required step
    /// cannot be dispatched. Nothing after that step runs.
    pub async fn execute_steps(
        &self,
        steps: &[WorkflowStep],
        mut context: WorkflowContext,
    ) -> WorkflowResult<Vec<StepResult>> {
        let mut results = Vec::with_capacity(steps.len());
        let mut completed: BTreeSet<StepId> = BTreeSet::new();

        for step in steps {
            if let Some(missing) = step
                .dependencies()
                .iter()
                .find(|dependency| !completed.contains(*dependency))
            {
                warn!(step = %step.id(), missing = %missing, "skipping step, dependencies not met");
                continue;
            }

            info!(step = %step.id(), agent = %step.agent(), description = step.description(), "executing step");
            let mut task = step.to_task(&context, self.clock.as_ref());
            let outcome = match self.dispatcher.assign_task(&mut task).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(step = %step.id(), error = %err, "step dispatch failed");
                    if step.is_optional() {
                        continue;
                    }
                    return Err(WorkflowError::Dispatch {
                        step: step.id().clone(),
                        source: err,
                    });
                }
            };

            results.push(StepResult::from_outcome(step.id().clone(), &outcome));
            if outcome.success {
                completed.insert(step.id().clone());
                if step.on_success().is_some()
                    && let Some(result) = outcome.result
                {
                    context.set_previous_result(result);
                }
                continue;
            }

            if let Some(hook) = step.on_failure() {
                warn!(step = %step.id(), handlers = ?hook.targets(), "step failed, failure handler declared");
            }
            if step.is_optional() {
                warn!(step = %step.id(), error = outcome.error_message(), "optional step failed, continuing");
                continue;
            }
            return Err(WorkflowError::RequiredStepFailed {
                step: step.id().clone(),
                description: step.description().to_owned(),
                reason: outcome.error_message().to_owned(),
            });
        }

        Ok(results)
    }
}
