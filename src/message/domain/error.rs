//! Message delivery and parsing errors.

use crate::agent::domain::AgentName;
use thiserror::Error;

/// Failure reported by a subscriber while handling a message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The subscriber refused the message.
    #[error("subscriber {subscriber} rejected message: {reason}")]
    Rejected {
        /// Subscriber that failed.
        subscriber: AgentName,
        /// Subscriber diagnostic.
        reason: String,
    },

    /// A bounded mailbox had no free slot.
    #[error("mailbox of {subscriber} is full")]
    MailboxFull {
        /// Mailbox owner.
        subscriber: AgentName,
    },

    /// The receiving half of a mailbox was dropped.
    #[error("mailbox of {subscriber} is closed")]
    MailboxClosed {
        /// Mailbox owner.
        subscriber: AgentName,
    },
}

/// Error returned while parsing message kinds from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown message kind: {0}")]
pub struct ParseMessageKindError(pub String);
