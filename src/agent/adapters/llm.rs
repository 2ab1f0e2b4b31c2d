//! Completion-backed agent configured by an [`AgentProfile`].

use crate::agent::domain::{
    AgentName, AgentProfile, AgentReport, AgentState, AgentStatus, ErrorRecord, ResultRecord,
    requested_writes,
};
use crate::agent::ports::{Agent, AgentError, AgentResult};
use crate::completion::domain::{CompletionOptions, ConversationLog, ConversationRole};
use crate::completion::ports::CompletionGateway;
use crate::task::domain::{Task, TaskAction, TaskId, TaskOutcome};
use crate::tools::domain::builtin_tool_definitions;
use crate::tools::services::ToolLoop;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

#[derive(Debug)]
struct AgentInner {
    status: AgentStatus,
    current_task: Option<TaskId>,
    conversation: ConversationLog,
    results: Vec<ResultRecord>,
    errors: Vec<ErrorRecord>,
    last_active: DateTime<Utc>,
}

/// Agent that prompts a completion gateway and optionally runs tool round
/// trips.
///
/// Every task starts a fresh conversation log holding the prompt, the replies
/// and any tool results; the log stays readable until the next task or
/// [`Agent::reset_conversation`]. A failed task moves the agent to `error`;
/// the next task is still accepted.
pub struct LlmAgent<C>
where
    C: Clock + Send + Sync,
{
    profile: AgentProfile,
    gateway: Arc<dyn CompletionGateway>,
    options: CompletionOptions,
    tools: Option<ToolLoop>,
    clock: Arc<C>,
    inner: RwLock<AgentInner>,
}

fn unavailable(err: impl std::fmt::Display) -> AgentError {
    AgentError::state_unavailable(std::io::Error::other(err.to_string()))
}

impl<C> LlmAgent<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an idle agent.
    ///
    /// `options` carries gateway defaults; the profile's model, token limit,
    /// temperature, and system prompt override them.
    #[must_use]
    pub fn new(
        profile: AgentProfile,
        gateway: Arc<dyn CompletionGateway>,
        options: CompletionOptions,
        clock: Arc<C>,
    ) -> Self {
        let inner = AgentInner {
            status: AgentStatus::Idle,
            current_task: None,
            conversation: ConversationLog::new(),
            results: Vec::new(),
            errors: Vec::new(),
            last_active: clock.utc(),
        };
        Self {
            profile,
            gateway,
            options,
            tools: None,
            clock,
            inner: RwLock::new(inner),
        }
    }

    /// Attaches a tool loop and advertises the built-in tool catalogue.
    #[must_use]
    pub fn with_tools(mut self, tools: ToolLoop) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Returns the agent profile.
    #[must_use]
    pub const fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Returns the successful task history.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::StateUnavailable`] when lock acquisition fails.
    pub fn results(&self) -> AgentResult<Vec<ResultRecord>> {
        let inner = self.inner.read().map_err(unavailable)?;
        Ok(inner.results.clone())
    }

    /// Returns the failed task history.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::StateUnavailable`] when lock acquisition fails.
    pub fn errors(&self) -> AgentResult<Vec<ErrorRecord>> {
        let inner = self.inner.read().map_err(unavailable)?;
        Ok(inner.errors.clone())
    }

    /// Returns a copy of the conversation log.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::StateUnavailable`] when lock acquisition fails.
    pub fn conversation(&self) -> AgentResult<ConversationLog> {
        let inner = self.inner.read().map_err(unavailable)?;
        Ok(inner.conversation.clone())
    }

    fn request_options(&self) -> CompletionOptions {
        let mut options = self.options.clone();
        if let Some(model) = self.profile.model() {
            model.clone_into(&mut options.model);
        }
        if let Some(max_tokens) = self.profile.max_tokens() {
            options.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.profile.temperature() {
            options.temperature = temperature;
        }
        if let Some(prompt) = self.profile.system_prompt() {
            options.system_prompt = Some(prompt.to_owned());
        }
        if self.tools.is_some() {
            options.tools = builtin_tool_definitions();
        }
        options
    }

    /// Moves to `working` and discards the previous conversation.
    fn begin(&self, task: &Task) -> AgentResult<()> {
        let mut inner = self.inner.write().map_err(unavailable)?;
        if !inner.status.accepts_tasks() {
            return Err(AgentError::Busy(self.profile.name().clone()));
        }
        inner.status = AgentStatus::Working;
        inner.current_task = Some(task.id());
        inner.last_active = self.clock.utc();
        inner.conversation.clear();
        Ok(())
    }

    /// Records the outcome and the task conversation, then leaves `working`.
    fn end(&self, outcome: &TaskOutcome, conversation: ConversationLog) -> AgentResult<()> {
        let timestamp = self.clock.utc();
        let mut inner = self.inner.write().map_err(unavailable)?;
        inner.conversation = conversation;
        inner.current_task = None;
        inner.last_active = timestamp;
        if outcome.success {
            inner.status = AgentStatus::Idle;
            inner.results.push(ResultRecord {
                task_id: outcome.task_id,
                result: outcome.result.clone().unwrap_or_default(),
                timestamp,
            });
        } else {
            inner.status = AgentStatus::Error;
            inner.errors.push(ErrorRecord {
                task_id: outcome.task_id,
                error: outcome.error_message().to_owned(),
                timestamp,
            });
        }
        Ok(())
    }

    async fn perform(&self, task: &Task, log: &mut ConversationLog) -> AgentResult<AgentReport> {
        let prompt = self.profile.render_prompt(task)?;
        let options = self.request_options();
        log.push_user_text(prompt);

        let mut response = self.gateway.complete(log, &options).await?;
        log.push_assistant(response.content.clone());

        if let Some(tool_loop) = &self.tools {
            let mut rounds = 0;
            while rounds < self.profile.max_tool_rounds() && response.has_tool_use() {
                let results = tool_loop.process_tool_calls(&response.content).await?;
                debug!(agent = %self.profile.name(), round = rounds, results = results.len(), "tool round complete");
                log.push_user_blocks(results);
                response = self.gateway.complete(log, &options).await?;
                log.push_assistant(response.content.clone());
                rounds += 1;
            }
        }

        let files = requested_writes(
            log.entries()
                .iter()
                .filter(|entry| entry.role == ConversationRole::Assistant)
                .flat_map(|entry| entry.content.iter()),
        );
        Ok(AgentReport::build(
            task,
            self.profile.report_style(),
            response.text_content(),
            files,
            self.clock.utc(),
        ))
    }
}

#[async_trait]
impl<C> Agent for LlmAgent<C>
where
    C: Clock + Send + Sync,
{
    fn name(&self) -> &AgentName {
        self.profile.name()
    }

    fn state(&self) -> AgentResult<AgentState> {
        let inner = self.inner.read().map_err(unavailable)?;
        Ok(AgentState {
            id: self.profile.name().clone(),
            role: self.profile.role().to_owned(),
            status: inner.status,
            current_task: inner.current_task,
            results_count: inner.results.len(),
            errors_count: inner.errors.len(),
            last_active: inner.last_active,
        })
    }

    fn can_handle(&self, action: &TaskAction) -> bool {
        self.profile.can_handle(action)
    }

    async fn execute_task(&self, task: &Task) -> AgentResult<TaskOutcome> {
        self.begin(task)?;
        let mut conversation = ConversationLog::new();
        info!(
            agent = %self.profile.name(),
            task_id = %task.id(),
            action = %task.action(),
            "executing task"
        );

        let outcome = match self.perform(task, &mut conversation).await {
            Ok(report) => {
                let files = report.files_modified.clone();
                TaskOutcome::succeeded(task.id(), report.to_value()).with_files_modified(files)
            }
            Err(err) => {
                warn!(agent = %self.profile.name(), task_id = %task.id(), error = %err, "task failed");
                TaskOutcome::failed(task.id(), err.to_string())
            }
        };

        self.end(&outcome, conversation)?;
        Ok(outcome)
    }

    fn reset_conversation(&self) -> AgentResult<()> {
        let mut inner = self.inner.write().map_err(unavailable)?;
        inner.conversation.clear();
        Ok(())
    }
}
