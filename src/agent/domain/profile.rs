//! Strategy values that configure an agent's prompts and reports.

use super::{AgentDomainError, AgentName};
use crate::task::domain::{Task, TaskAction};
use minijinja::Environment;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Template used when no action-specific template matches.
const DEFAULT_FALLBACK_TEMPLATE: &str = "Please complete this task:\n{{ metadata }}";

/// Map from action to `minijinja` prompt template.
///
/// Templates see `description`, `action`, `metadata` (pretty-printed JSON)
/// and `context` (the metadata as an object). The rendered body is prefixed
/// with the task description and action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplates {
    by_action: HashMap<String, String>,
    fallback: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            by_action: HashMap::new(),
            fallback: DEFAULT_FALLBACK_TEMPLATE.to_owned(),
        }
    }
}

impl PromptTemplates {
    /// Creates an empty template map using the default fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a template for an action, replacing any previous one.
    #[must_use]
    pub fn with_action(mut self, action: &TaskAction, template: impl Into<String>) -> Self {
        self.by_action
            .insert(action.as_str().to_owned(), template.into());
        self
    }

    /// Replaces the fallback template.
    #[must_use]
    pub fn with_fallback(mut self, template: impl Into<String>) -> Self {
        self.fallback = template.into();
        self
    }

    /// Returns the template for `action`, or the fallback.
    #[must_use]
    pub fn for_action(&self, action: &TaskAction) -> &str {
        self.by_action
            .get(action.as_str())
            .map_or(self.fallback.as_str(), String::as_str)
    }
}

/// Which extra fields an agent adds to its task report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportStyle {
    /// Only the common fields.
    #[default]
    FilesModified,
    /// Adds `testsCreated`: written paths that look like test files.
    TestsCreated,
    /// Adds `docsCreated`: written paths that look like documentation.
    DocsCreated,
    /// Adds `validationResults` derived from the response text.
    Validation,
}

/// Configuration that makes an agent a developer, tester, or any other role.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfile {
    name: AgentName,
    role: String,
    system_prompt: Option<String>,
    templates: PromptTemplates,
    capabilities: Vec<TaskAction>,
    report_style: ReportStyle,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    max_tool_rounds: usize,
}

impl AgentProfile {
    /// Creates a profile with default templates and no capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::EmptyRole`] when `role` is blank.
    pub fn new(name: AgentName, role: impl Into<String>) -> Result<Self, AgentDomainError> {
        let raw_role = role.into();
        let role = raw_role.trim();
        if role.is_empty() {
            return Err(AgentDomainError::EmptyRole);
        }
        Ok(Self {
            name,
            role: role.to_owned(),
            system_prompt: None,
            templates: PromptTemplates::default(),
            capabilities: Vec::new(),
            report_style: ReportStyle::default(),
            model: None,
            max_tokens: None,
            temperature: None,
            max_tool_rounds: 0,
        })
    }

    /// Sets the system prompt sent with every completion.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the prompt templates.
    #[must_use]
    pub fn with_templates(mut self, templates: PromptTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Sets the actions this agent handles.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = TaskAction>) -> Self {
        self.capabilities = capabilities.into_iter().collect();
        self
    }

    /// Sets the report style.
    #[must_use]
    pub const fn with_report_style(mut self, style: ReportStyle) -> Self {
        self.report_style = style;
        self
    }

    /// Overrides the completion model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Overrides the completion token limit.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Overrides the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets how many tool round trips one task may perform.
    ///
    /// With zero rounds, tool requests are only recorded in the report.
    #[must_use]
    pub const fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds;
        self
    }

    /// Returns the agent name.
    #[must_use]
    pub const fn name(&self) -> &AgentName {
        &self.name
    }

    /// Returns the agent role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the system prompt, if any.
    #[must_use]
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    /// Returns the declared capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &[TaskAction] {
        &self.capabilities
    }

    /// Returns the report style.
    #[must_use]
    pub const fn report_style(&self) -> ReportStyle {
        self.report_style
    }

    /// Returns the model override, if any.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the token-limit override, if any.
    #[must_use]
    pub const fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    /// Returns the temperature override, if any.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    /// Returns the tool round-trip limit.
    #[must_use]
    pub const fn max_tool_rounds(&self) -> usize {
        self.max_tool_rounds
    }

    /// Returns `true` when `action` is among the declared capabilities.
    #[must_use]
    pub fn can_handle(&self, action: &TaskAction) -> bool {
        self.capabilities.contains(action)
    }

    /// Renders the user prompt for a task.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::TemplateRender`] when the template fails
    /// to parse or render.
    pub fn render_prompt(&self, task: &Task) -> Result<String, AgentDomainError> {
        let template = self.templates.for_action(task.action());
        let metadata = task.metadata().to_value();
        let pretty = serde_json::to_string_pretty(&metadata).map_err(|err| {
            AgentDomainError::TemplateRender {
                action: task.action().to_string(),
                reason: err.to_string(),
            }
        })?;

        let mut context = Map::new();
        context.insert(
            "description".to_owned(),
            Value::String(task.description().to_owned()),
        );
        context.insert(
            "action".to_owned(),
            Value::String(task.action().as_str().to_owned()),
        );
        context.insert("metadata".to_owned(), Value::String(pretty));
        context.insert("context".to_owned(), metadata);

        let body = Environment::new()
            .render_str(template, context)
            .map_err(|err| AgentDomainError::TemplateRender {
                action: task.action().to_string(),
                reason: err.to_string(),
            })?;

        Ok(format!(
            "Task: {}\nAction: {}\n\n{body}",
            task.description(),
            task.action()
        ))
    }
}
