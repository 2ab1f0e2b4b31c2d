//! Shared world state for workflow execution BDD scenarios.

use brigade::agent::adapters::LlmAgent;
use brigade::agent::domain::{AgentName, AgentProfile};
use brigade::completion::adapters::ScriptedCompletionGateway;
use brigade::completion::domain::CompletionOptions;
use brigade::dispatch::services::TaskDispatcher;
use brigade::message::services::MessageBus;
use brigade::state::services::SharedStateStore;
use brigade::workflow::domain::{StepResult, WorkflowStep};
use brigade::workflow::services::{WorkflowError, WorkflowExecutor};
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use rstest::fixture;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Agents available to every scenario.
pub const TEAM: [&str; 4] = ["developer", "tester", "validator", "documenter"];

/// Scenario world for workflow execution behaviour tests.
pub struct WorkflowWorld {
    pub executor: Option<WorkflowExecutor<DefaultClock>>,
    pub gateways: BTreeMap<String, ScriptedCompletionGateway>,
    pub steps: Vec<WorkflowStep>,
    pub outcome: Option<Result<Vec<StepResult>, WorkflowError>>,
}

impl WorkflowWorld {
    /// Creates a world with no team registered.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            executor: None,
            gateways: BTreeMap::new(),
            steps: Vec::new(),
            outcome: None,
        }
    }

    /// Registers one completion-backed agent per [`TEAM`] member.
    pub fn assemble_team(&mut self) -> Result<(), eyre::Report> {
        let clock = Arc::new(DefaultClock);
        let dispatcher = Arc::new(TaskDispatcher::new(
            SharedStateStore::new(Arc::clone(&clock)),
            MessageBus::new(Arc::clone(&clock)),
            Arc::clone(&clock),
        ));
        for name in TEAM {
            let profile = AgentProfile::new(AgentName::new(name).wrap_err("agent name")?, name)
                .wrap_err("agent profile")?;
            let gateway = ScriptedCompletionGateway::new();
            let agent = LlmAgent::new(
                profile,
                Arc::new(gateway.clone()),
                CompletionOptions::new("scenario-model", 128, 0.0),
                Arc::clone(&clock),
            );
            dispatcher
                .register_agent(Arc::new(agent))
                .wrap_err("register agent")?;
            self.gateways.insert(name.to_owned(), gateway);
        }
        self.executor = Some(WorkflowExecutor::new(dispatcher, clock));
        Ok(())
    }

    /// Returns the scripted gateway behind `agent`.
    pub fn gateway(&self, agent: &str) -> Result<&ScriptedCompletionGateway, eyre::Report> {
        self.gateways
            .get(agent)
            .ok_or_else(|| eyre!("no agent named {agent} in the team"))
    }
}

impl Default for WorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkflowWorld {
    WorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
