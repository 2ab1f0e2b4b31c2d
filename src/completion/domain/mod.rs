//! Canonical completion request and response values.

mod content;
mod conversation;
mod options;
mod response;

pub use content::{ContentBlock, joined_text};
pub use conversation::{ConversationEntry, ConversationLog, ConversationRole};
pub use options::{CompletionOptions, ToolDefinition};
pub use response::{CompletionResponse, HealthReport, HealthStatus, Usage};
