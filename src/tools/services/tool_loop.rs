//! Executes the tool requests contained in a completion response.

use crate::completion::domain::ContentBlock;
use crate::tools::domain::{ToolExecutionResult, ToolInvocation, ToolName};
use crate::tools::ports::ToolHost;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that abort a tool round trip.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolLoopError {
    /// A `tool_use` block named a tool outside the catalogue.
    #[error("unknown tool '{name}' requested by {tool_use_id}")]
    UnknownTool {
        /// Identifier of the offending block.
        tool_use_id: String,
        /// Requested tool name.
        name: String,
    },
}

/// Runs tool requests sequentially against a [`ToolHost`].
#[derive(Clone)]
pub struct ToolLoop {
    host: Arc<dyn ToolHost>,
}

struct ToolCall<'a> {
    id: &'a str,
    tool: ToolName,
    input: &'a Value,
}

impl ToolLoop {
    /// Creates a loop over `host`.
    #[must_use]
    pub fn new(host: Arc<dyn ToolHost>) -> Self {
        Self { host }
    }

    /// Executes every `tool_use` block in `content` and returns one
    /// `tool_result` block per request, in request order.
    ///
    /// Non-tool blocks are ignored. A failing tool yields an error result and
    /// does not affect its siblings. Tool names are checked before anything
    /// runs.
    ///
    /// # Errors
    ///
    /// Returns [`ToolLoopError::UnknownTool`] when any block names a tool
    /// outside the catalogue; no tool is executed in that case.
    pub async fn process_tool_calls(
        &self,
        content: &[ContentBlock],
    ) -> Result<Vec<ContentBlock>, ToolLoopError> {
        let calls = content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
                _ => None,
            })
            .map(|(id, name, input)| {
                name.parse::<ToolName>()
                    .map(|tool| ToolCall { id, tool, input })
                    .map_err(|_| ToolLoopError::UnknownTool {
                        tool_use_id: id.clone(),
                        name: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            debug!(tool = %call.tool, tool_use_id = call.id, "executing tool");
            match self.run(call.tool, call.input).await {
                Ok(output) => results.push(ContentBlock::tool_result(call.id, output)),
                Err(err) => {
                    warn!(tool = %call.tool, tool_use_id = call.id, error = %err, "tool failed");
                    results.push(ContentBlock::tool_error(call.id, format!("Error: {err}")));
                }
            }
        }
        Ok(results)
    }

    async fn run(&self, tool: ToolName, input: &Value) -> ToolExecutionResult<String> {
        match ToolInvocation::decode(tool, input)? {
            ToolInvocation::ReadFile(args) => self.host.read_file(&args).await,
            ToolInvocation::WriteFile(args) => self.host.write_file(&args).await,
            ToolInvocation::ExecuteCommand(args) => self.host.execute_command(&args).await,
            ToolInvocation::SearchCode(args) => self.host.search_code(&args).await,
            ToolInvocation::ListFiles(args) => self.host.list_files(&args).await,
        }
    }
}
