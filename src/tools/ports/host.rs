//! Tool host port.

use crate::tools::domain::{
    ExecuteCommandInput, ListFilesInput, ReadFileInput, SearchCodeInput, ToolExecutionResult,
    WriteFileInput,
};
use async_trait::async_trait;

/// Executes built-in tools against some environment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolHost: Send + Sync {
    /// Returns the file content.
    async fn read_file(&self, input: &ReadFileInput) -> ToolExecutionResult<String>;

    /// Writes the file, creating parent directories, and returns a summary.
    async fn write_file(&self, input: &WriteFileInput) -> ToolExecutionResult<String>;

    /// Runs the command to completion and returns its combined output.
    async fn execute_command(&self, input: &ExecuteCommandInput) -> ToolExecutionResult<String>;

    /// Returns matching lines as `path:line:text`.
    async fn search_code(&self, input: &SearchCodeInput) -> ToolExecutionResult<String>;

    /// Returns one entry per line, directories suffixed with `/`.
    async fn list_files(&self, input: &ListFilesInput) -> ToolExecutionResult<String>;
}
