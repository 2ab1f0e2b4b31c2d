//! Tool execution errors.

use super::ToolName;
use thiserror::Error;

/// Result type for a single tool invocation.
pub type ToolExecutionResult<T> = Result<T, ToolExecutionError>;

/// Failure of one tool invocation.
///
/// These errors are reported back to the backend as `tool_result` content
/// and never abort sibling invocations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolExecutionError {
    /// The tool input did not match the tool schema.
    #[error("invalid input for {tool}: {reason}")]
    InvalidInput {
        /// Tool that rejected the input.
        tool: ToolName,
        /// Decoder diagnostic.
        reason: String,
    },

    /// A path was absolute or climbed out of the workspace root.
    #[error("path '{0}' is outside the workspace")]
    PathOutsideWorkspace(String),

    /// A filesystem operation failed.
    #[error("{operation} '{path}' failed: {reason}")]
    Io {
        /// Operation name.
        operation: &'static str,
        /// Path involved.
        path: String,
        /// OS diagnostic.
        reason: String,
    },

    /// A search or filter pattern failed to compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A command exited unsuccessfully.
    #[error("command exited with {status}: {output}")]
    CommandFailed {
        /// Exit status description.
        status: String,
        /// Combined stdout and stderr.
        output: String,
    },

    /// A command could not be started.
    #[error("failed to spawn command: {0}")]
    Spawn(String),
}

/// Error returned when a tool name is not in the catalogue.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown tool: {0}")]
pub struct ParseToolNameError(pub String);
