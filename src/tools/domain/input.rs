//! Typed tool inputs.

use super::{ToolExecutionError, ToolName};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input of `read_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileInput {
    /// Path relative to the workspace root.
    pub file_path: String,
}

/// Input of `write_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFileInput {
    /// Path relative to the workspace root.
    pub file_path: String,
    /// Full file content.
    pub content: String,
}

/// Input of `execute_command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteCommandInput {
    /// Shell command line.
    pub command: String,
    /// Working directory relative to the workspace root.
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Input of `search_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCodeInput {
    /// Regular expression matched against each line.
    pub pattern: String,
    /// Glob restricting which file names are searched.
    #[serde(default)]
    pub file_pattern: Option<String>,
}

/// Input of `list_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesInput {
    /// Directory relative to the workspace root.
    pub directory: String,
    /// Glob restricting which entry names are listed.
    #[serde(default)]
    pub pattern: Option<String>,
}

/// A decoded tool request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    /// `read_file`.
    ReadFile(ReadFileInput),
    /// `write_file`.
    WriteFile(WriteFileInput),
    /// `execute_command`.
    ExecuteCommand(ExecuteCommandInput),
    /// `search_code`.
    SearchCode(SearchCodeInput),
    /// `list_files`.
    ListFiles(ListFilesInput),
}

impl ToolInvocation {
    /// Decodes `input` according to the schema of `tool`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolExecutionError::InvalidInput`] when the input does not
    /// match the schema.
    pub fn decode(tool: ToolName, input: &Value) -> Result<Self, ToolExecutionError> {
        let invalid = |err: serde_json::Error| ToolExecutionError::InvalidInput {
            tool,
            reason: err.to_string(),
        };
        let input = input.clone();
        match tool {
            ToolName::ReadFile => serde_json::from_value(input)
                .map(Self::ReadFile)
                .map_err(invalid),
            ToolName::WriteFile => serde_json::from_value(input)
                .map(Self::WriteFile)
                .map_err(invalid),
            ToolName::ExecuteCommand => serde_json::from_value(input)
                .map(Self::ExecuteCommand)
                .map_err(invalid),
            ToolName::SearchCode => serde_json::from_value(input)
                .map(Self::SearchCode)
                .map_err(invalid),
            ToolName::ListFiles => serde_json::from_value(input)
                .map(Self::ListFiles)
                .map_err(invalid),
        }
    }

    /// Returns the tool this invocation targets.
    #[must_use]
    pub const fn tool(&self) -> ToolName {
        match self {
            Self::ReadFile(_) => ToolName::ReadFile,
            Self::WriteFile(_) => ToolName::WriteFile,
            Self::ExecuteCommand(_) => ToolName::ExecuteCommand,
            Self::SearchCode(_) => ToolName::SearchCode,
            Self::ListFiles(_) => ToolName::ListFiles,
        }
    }
}
