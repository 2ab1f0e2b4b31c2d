//! Canonical completion responses and backend health reports.

use super::{ContentBlock, joined_text};
use serde::{Deserialize, Serialize};

/// Token accounting reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens.
    pub input_tokens: u64,
    /// Generated tokens.
    pub output_tokens: u64,
}

/// Backend-independent completion result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Ordered content blocks.
    pub content: Vec<ContentBlock>,
    /// Token accounting.
    pub usage: Usage,
}

impl CompletionResponse {
    /// Creates a response holding a single text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            usage: Usage::default(),
        }
    }

    /// Creates a response from blocks with zero usage.
    #[must_use]
    pub const fn from_blocks(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            usage: Usage {
                input_tokens: 0,
                output_tokens: 0,
            },
        }
    }

    /// Joins all text blocks with newlines.
    #[must_use]
    pub fn text_content(&self) -> String {
        joined_text(&self.content)
    }

    /// Returns `true` when any block requests a tool.
    #[must_use]
    pub fn has_tool_use(&self) -> bool {
        self.content.iter().any(ContentBlock::is_tool_use)
    }
}

/// Reachability of a completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Backend answered.
    Healthy,
    /// Backend could not be reached or answered with an error.
    Error,
}

/// Result of a backend health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Provider name.
    pub provider: String,
    /// Check verdict.
    pub status: HealthStatus,
    /// Models the backend reports, when known.
    pub models: Vec<String>,
    /// Diagnostic or hint for operators.
    pub message: Option<String>,
}
