//! Port contracts for tool execution.

mod host;

#[cfg(test)]
pub use host::MockToolHost;
pub use host::ToolHost;
