//! Append-only conversation log owned by an agent.

use super::ContentBlock;
use serde::{Deserialize, Serialize};

/// Speaker of a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    /// Prompt or tool results sent by the agent.
    User,
    /// Completion returned by the backend.
    Assistant,
}

impl ConversationRole {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One role-tagged turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Speaker.
    pub role: ConversationRole,
    /// Ordered content blocks.
    pub content: Vec<ContentBlock>,
}

/// Ordered, append-only list of conversation turns.
///
/// Entries can only be appended or cleared wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn holding one text block.
    pub fn push_user_text(&mut self, text: impl Into<String>) {
        self.push(ConversationRole::User, vec![ContentBlock::text(text)]);
    }

    /// Appends a user turn holding arbitrary blocks, such as tool results.
    pub fn push_user_blocks(&mut self, content: Vec<ContentBlock>) {
        self.push(ConversationRole::User, content);
    }

    /// Appends an assistant turn.
    pub fn push_assistant(&mut self, content: Vec<ContentBlock>) {
        self.push(ConversationRole::Assistant, content);
    }

    fn push(&mut self, role: ConversationRole, content: Vec<ContentBlock>) {
        self.entries.push(ConversationEntry { role, content });
    }

    /// Returns all entries in order.
    #[must_use]
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no turns have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
