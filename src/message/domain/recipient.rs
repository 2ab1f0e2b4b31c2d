//! Message addressing.

use crate::agent::domain::{AgentDomainError, AgentName, BROADCAST};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination of a message: one agent, or every broadcast subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recipient {
    /// A single agent.
    Agent(AgentName),
    /// Every subscriber on the broadcast channel.
    Broadcast,
}

impl Recipient {
    /// Returns the wire form: the agent name or `broadcast`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Agent(name) => name.as_str(),
            Self::Broadcast => BROADCAST,
        }
    }

    /// Returns the addressed agent, if any.
    #[must_use]
    pub const fn agent(&self) -> Option<&AgentName> {
        match self {
            Self::Agent(name) => Some(name),
            Self::Broadcast => None,
        }
    }
}

impl From<AgentName> for Recipient {
    fn from(value: AgentName) -> Self {
        Self::Agent(value)
    }
}

impl TryFrom<String> for Recipient {
    type Error = AgentDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case(BROADCAST) {
            return Ok(Self::Broadcast);
        }
        AgentName::new(value).map(Self::Agent)
    }
}

impl From<Recipient> for String {
    fn from(value: Recipient) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
