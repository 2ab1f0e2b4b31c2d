//! Tool names, inputs, schemas and execution errors.

mod catalogue;
mod error;
mod input;
mod name;

pub use catalogue::builtin_tool_definitions;
pub use error::{ParseToolNameError, ToolExecutionError, ToolExecutionResult};
pub use input::{
    ExecuteCommandInput, ListFilesInput, ReadFileInput, SearchCodeInput, ToolInvocation,
    WriteFileInput,
};
pub use name::ToolName;
