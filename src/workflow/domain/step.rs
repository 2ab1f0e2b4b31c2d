//! Workflow steps.

use crate::agent::domain::AgentName;
use crate::task::domain::{
    StepId, Task, TaskAction, TaskDraft, TaskKind, TaskMetadata, WorkflowContext,
};
use mockable::Clock;
use serde::Deserialize;

/// Marker attached to a step for its success or failure branch.
///
/// Definitions may give a single name or a list of names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HookRepr")]
pub struct StepHook(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum HookRepr {
    One(String),
    Many(Vec<String>),
}

impl From<HookRepr> for StepHook {
    fn from(value: HookRepr) -> Self {
        match value {
            HookRepr::One(name) => Self(vec![name]),
            HookRepr::Many(names) => Self(names),
        }
    }
}

impl StepHook {
    /// Creates a hook naming `targets`.
    #[must_use]
    pub fn new(targets: impl IntoIterator<Item = String>) -> Self {
        Self(targets.into_iter().collect())
    }

    /// Returns the named targets.
    #[must_use]
    pub fn targets(&self) -> &[String] {
        &self.0
    }
}

/// Immutable declaration of one task template plus its dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    id: StepId,
    agent: AgentName,
    action: TaskAction,
    description: String,
    #[serde(default)]
    dependencies: Vec<StepId>,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    on_success: Option<StepHook>,
    #[serde(default)]
    on_failure: Option<StepHook>,
}

impl WorkflowStep {
    /// Creates a required step with no dependencies.
    #[must_use]
    pub fn new(
        id: StepId,
        agent: AgentName,
        action: TaskAction,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            agent,
            action,
            description: description.into(),
            dependencies: Vec::new(),
            optional: false,
            on_success: None,
            on_failure: None,
        }
    }

    /// Sets the steps that must complete first.
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = StepId>) -> Self {
        self.dependencies = dependencies.into_iter().collect();
        self
    }

    /// Marks the step as optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the success hook.
    #[must_use]
    pub fn with_on_success(mut self, hook: StepHook) -> Self {
        self.on_success = Some(hook);
        self
    }

    /// Sets the failure hook.
    #[must_use]
    pub fn with_on_failure(mut self, hook: StepHook) -> Self {
        self.on_failure = Some(hook);
        self
    }

    /// Returns the step identifier.
    #[must_use]
    pub const fn id(&self) -> &StepId {
        &self.id
    }

    /// Returns the agent the step runs on.
    #[must_use]
    pub const fn agent(&self) -> &AgentName {
        &self.agent
    }

    /// Returns the requested action.
    #[must_use]
    pub const fn action(&self) -> &TaskAction {
        &self.action
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the dependency identifiers.
    #[must_use]
    pub fn dependencies(&self) -> &[StepId] {
        &self.dependencies
    }

    /// Returns `true` when a failure does not stop the workflow.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the success hook.
    #[must_use]
    pub const fn on_success(&self) -> Option<&StepHook> {
        self.on_success.as_ref()
    }

    /// Returns the failure hook.
    #[must_use]
    pub const fn on_failure(&self) -> Option<&StepHook> {
        self.on_failure.as_ref()
    }

    /// Builds a fresh pending task carrying `context` as metadata.
    #[must_use]
    pub fn to_task(&self, context: &WorkflowContext, clock: &impl Clock) -> Task {
        TaskDraft::new(
            TaskKind::WorkflowStep,
            self.action.clone(),
            self.description.clone(),
            self.agent.clone(),
        )
        .with_metadata(TaskMetadata::Context(context.clone()))
        .with_dependencies(self.dependencies.iter().cloned())
        .build(clock)
    }
}
