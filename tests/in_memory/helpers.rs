//! Shared fixtures for in-memory integration tests.

use brigade::agent::adapters::LlmAgent;
use brigade::agent::domain::{AgentName, AgentProfile, ReportStyle};
use brigade::completion::adapters::ScriptedCompletionGateway;
use brigade::completion::domain::CompletionOptions;
use brigade::dispatch::services::TaskDispatcher;
use brigade::message::services::MessageBus;
use brigade::state::services::SharedStateStore;
use brigade::task::domain::TaskAction;
use brigade::workflow::services::WorkflowExecutor;
use eyre::{Result, WrapErr};
use mockable::DefaultClock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Role, report style and capabilities of each team member.
const ROSTER: [(&str, ReportStyle, &[&str]); 4] = [
    (
        "developer",
        ReportStyle::FilesModified,
        &["implement-feature", "fix-bug", "refactor"],
    ),
    ("tester", ReportStyle::TestsCreated, &["write-tests", "run-tests"]),
    ("validator", ReportStyle::Validation, &["validate-code", "review"]),
    ("documenter", ReportStyle::DocsCreated, &["write-docs"]),
];

/// Orchestrator wired to completion-backed agents with scripted gateways.
pub struct Team {
    pub dispatcher: Arc<TaskDispatcher<DefaultClock>>,
    pub executor: WorkflowExecutor<DefaultClock>,
    pub clock: Arc<DefaultClock>,
    gateways: BTreeMap<String, ScriptedCompletionGateway>,
}

impl Team {
    /// Registers one agent per roster entry, each with its own script.
    pub fn new() -> Result<Self> {
        let clock = Arc::new(DefaultClock);
        let dispatcher = Arc::new(TaskDispatcher::new(
            SharedStateStore::new(Arc::clone(&clock)),
            MessageBus::new(Arc::clone(&clock)),
            Arc::clone(&clock),
        ));
        let mut gateways = BTreeMap::new();

        for (name, style, actions) in ROSTER {
            let capabilities = actions
                .iter()
                .map(|action| TaskAction::new(*action))
                .collect::<Result<Vec<_>, _>>()
                .wrap_err("capabilities")?;
            let profile = AgentProfile::new(AgentName::new(name).wrap_err("agent name")?, name)
                .wrap_err("agent profile")?
                .with_system_prompt(format!("You are the {name} agent."))
                .with_capabilities(capabilities)
                .with_report_style(style);
            let gateway = ScriptedCompletionGateway::new();
            let agent = LlmAgent::new(
                profile,
                Arc::new(gateway.clone()),
                CompletionOptions::new("test-model", 256, 0.0),
                Arc::clone(&clock),
            );
            dispatcher
                .register_agent(Arc::new(agent))
                .wrap_err("register agent")?;
            gateways.insert(name.to_owned(), gateway);
        }

        let executor = WorkflowExecutor::new(Arc::clone(&dispatcher), Arc::clone(&clock));
        Ok(Self {
            dispatcher,
            executor,
            clock,
            gateways,
        })
    }

    /// Returns the scripted gateway behind `agent`.
    pub fn gateway(&self, agent: &str) -> Result<&ScriptedCompletionGateway> {
        self.gateways
            .get(agent)
            .ok_or_else(|| eyre::eyre!("no agent named {agent}"))
    }

    /// Queues a text reply for `agent`.
    pub fn reply(&self, agent: &str, text: &str) -> Result<()> {
        self.gateway(agent)?
            .push_text(text)
            .wrap_err("queue scripted reply")
    }
}
