//! Outbound and stamped messages.

use super::{MessageKind, Recipient};
use crate::agent::domain::AgentName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// A message before the bus stamps it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    /// Sender.
    pub from: AgentName,
    /// Destination.
    pub to: Recipient,
    /// Message kind.
    pub kind: MessageKind,
    /// Free-form payload.
    pub payload: Value,
}

impl OutboundMessage {
    /// Creates an outbound message.
    #[must_use]
    pub fn new(from: AgentName, to: impl Into<Recipient>, kind: MessageKind, payload: Value) -> Self {
        Self {
            from,
            to: to.into(),
            kind,
            payload,
        }
    }

    /// Creates a message addressed to every broadcast subscriber.
    #[must_use]
    pub const fn broadcast(from: AgentName, kind: MessageKind, payload: Value) -> Self {
        Self {
            from,
            to: Recipient::Broadcast,
            kind,
            payload,
        }
    }

    /// Stamps the message with its send time.
    #[must_use]
    pub fn stamp(self, timestamp: DateTime<Utc>) -> AgentMessage {
        AgentMessage {
            from: self.from,
            to: self.to,
            kind: self.kind,
            payload: self.payload,
            timestamp,
        }
    }
}

/// An immutable message retained in the bus history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMessage {
    from: AgentName,
    to: Recipient,
    #[serde(rename = "type")]
    kind: MessageKind,
    payload: Value,
    timestamp: DateTime<Utc>,
}

impl AgentMessage {
    /// Returns the sender.
    #[must_use]
    pub const fn sender(&self) -> &AgentName {
        &self.from
    }

    /// Returns the destination.
    #[must_use]
    pub const fn recipient(&self) -> &Recipient {
        &self.to
    }

    /// Returns the message kind.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the time the bus accepted the message.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
