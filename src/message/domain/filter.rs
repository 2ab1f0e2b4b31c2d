//! History query filter.

use super::{AgentMessage, MessageKind, Recipient};
use crate::agent::domain::AgentName;

/// Conjunction of optional sender, recipient and kind constraints.
///
/// The default filter matches every message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    from: Option<AgentName>,
    to: Option<Recipient>,
    kind: Option<MessageKind>,
}

impl HistoryFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to messages from `sender`.
    #[must_use]
    pub fn with_from(mut self, sender: AgentName) -> Self {
        self.from = Some(sender);
        self
    }

    /// Restricts to messages addressed to `recipient`.
    #[must_use]
    pub fn with_to(mut self, recipient: impl Into<Recipient>) -> Self {
        self.to = Some(recipient.into());
        self
    }

    /// Restricts to messages of `kind`.
    #[must_use]
    pub const fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Returns `true` when `message` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, message: &AgentMessage) -> bool {
        self.from.as_ref().is_none_or(|from| message.sender() == from)
            && self.to.as_ref().is_none_or(|to| message.recipient() == to)
            && self.kind.is_none_or(|kind| message.kind() == kind)
    }
}
