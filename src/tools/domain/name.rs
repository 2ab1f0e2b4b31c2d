//! Built-in tool names.

use super::ParseToolNameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five built-in tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Read a file.
    ReadFile,
    /// Write or create a file.
    WriteFile,
    /// Run a shell command.
    ExecuteCommand,
    /// Regex-search across files.
    SearchCode,
    /// List a directory.
    ListFiles,
}

impl ToolName {
    /// All built-in tools in catalogue order.
    pub const ALL: [Self; 5] = [
        Self::ReadFile,
        Self::WriteFile,
        Self::ExecuteCommand,
        Self::SearchCode,
        Self::ListFiles,
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadFile => "read_file",
            Self::WriteFile => "write_file",
            Self::ExecuteCommand => "execute_command",
            Self::SearchCode => "search_code",
            Self::ListFiles => "list_files",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ParseToolNameError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == value)
            .ok_or_else(|| ParseToolNameError(value.to_owned()))
    }
}
