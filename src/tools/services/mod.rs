//! Tool orchestration services.

mod tool_loop;

pub use tool_loop::{ToolLoop, ToolLoopError};
