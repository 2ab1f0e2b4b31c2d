//! Task reports produced by completion-backed agents.

use super::ReportStyle;
use crate::completion::domain::ContentBlock;
use crate::task::domain::{Task, TaskAction};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Tool whose requests count as file modifications.
const WRITE_FILE_TOOL: &str = "write_file";

/// Heuristic reading of a validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// The response mentions passing and never mentions failing.
    pub passed: bool,
    /// The response mentions an error.
    pub has_errors: bool,
    /// The response mentions a warning.
    pub has_warnings: bool,
    /// Full response text.
    pub summary: String,
}

impl ValidationSummary {
    /// Derives the summary from response text, case-insensitively.
    #[must_use]
    pub fn from_response(text: &str) -> Self {
        let lower = text.to_lowercase();
        Self {
            passed: lower.contains("pass") && !lower.contains("fail"),
            has_errors: lower.contains("error"),
            has_warnings: lower.contains("warning"),
            summary: text.to_owned(),
        }
    }
}

/// Role-specific report fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportExtras {
    /// No extra fields.
    None,
    /// Test files the agent wrote.
    TestsCreated(Vec<String>),
    /// Documentation files the agent wrote.
    DocsCreated(Vec<String>),
    /// Validation verdict.
    Validation(ValidationSummary),
}

/// Result payload of a completion-backed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentReport {
    /// Action performed.
    pub action: TaskAction,
    /// Task description.
    pub description: String,
    /// Text of the final completion response.
    pub response: String,
    /// Paths the agent asked to write, in request order.
    pub files_modified: Vec<String>,
    /// Role-specific fields.
    pub extras: ReportExtras,
    /// Report time.
    pub timestamp: DateTime<Utc>,
}

impl AgentReport {
    /// Builds a report for `task` from the response text and written paths.
    #[must_use]
    pub fn build(
        task: &Task,
        style: ReportStyle,
        response: String,
        files_modified: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let extras = match style {
            ReportStyle::FilesModified => ReportExtras::None,
            ReportStyle::TestsCreated => ReportExtras::TestsCreated(
                files_modified
                    .iter()
                    .filter(|path| is_test_file(path))
                    .cloned()
                    .collect(),
            ),
            ReportStyle::DocsCreated => ReportExtras::DocsCreated(
                files_modified
                    .iter()
                    .filter(|path| is_doc_file(path))
                    .cloned()
                    .collect(),
            ),
            ReportStyle::Validation => {
                ReportExtras::Validation(ValidationSummary::from_response(&response))
            }
        };
        Self {
            action: task.action().clone(),
            description: task.description().to_owned(),
            response,
            files_modified,
            extras,
            timestamp,
        }
    }

    /// Returns the report as the JSON result payload.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("action".to_owned(), json!(self.action.as_str()));
        map.insert("description".to_owned(), json!(self.description));
        map.insert("response".to_owned(), json!(self.response));
        map.insert("filesModified".to_owned(), json!(self.files_modified));
        match &self.extras {
            ReportExtras::None => {}
            ReportExtras::TestsCreated(paths) => {
                map.insert("testsCreated".to_owned(), json!(paths));
            }
            ReportExtras::DocsCreated(paths) => {
                map.insert("docsCreated".to_owned(), json!(paths));
            }
            ReportExtras::Validation(summary) => {
                map.insert("validationResults".to_owned(), json!(summary));
            }
        }
        map.insert("timestamp".to_owned(), json!(self.timestamp));
        Value::Object(map)
    }
}

/// Collects `write_file` paths requested in `blocks`, without duplicates.
#[must_use]
pub(crate) fn requested_writes<'a>(
    blocks: impl IntoIterator<Item = &'a ContentBlock>,
) -> Vec<String> {
    let mut paths: Vec<String> = Vec::new();
    for block in blocks {
        let ContentBlock::ToolUse { name, input, .. } = block else {
            continue;
        };
        if name != WRITE_FILE_TOOL {
            continue;
        }
        if let Some(path) = input.get("file_path").and_then(Value::as_str)
            && !paths.iter().any(|known| known == path)
        {
            paths.push(path.to_owned());
        }
    }
    paths
}

/// Returns `true` for paths that follow common test-file conventions.
#[must_use]
fn is_test_file(path: &str) -> bool {
    path.contains(".test.")
        || path.contains(".spec.")
        || path.contains("test_")
        || path.contains("/__tests__/")
}

/// Returns `true` for paths that look like documentation.
#[must_use]
fn is_doc_file(path: &str) -> bool {
    path.ends_with(".md")
        || path.contains("/docs/")
        || path.contains("README")
        || path.contains("CHANGELOG")
}
