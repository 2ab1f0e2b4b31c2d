//! Validated agent name type.

use super::AgentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for an agent name.
const MAX_NAME_LENGTH: usize = 64;

/// Name reserved for the message bus broadcast channel.
pub(crate) const BROADCAST: &str = "broadcast";

/// Sender name used for notices the dispatcher publishes.
const ORCHESTRATOR: &str = "orchestrator";

/// Validated, lowercase agent identifier.
///
/// Agent names route tasks and messages (e.g. `developer`, `code-reviewer`).
/// The name `broadcast` is reserved for the message bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    /// Creates a validated agent name.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_-]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AgentDomainError::EmptyAgentName`] when the value is blank,
    /// [`AgentDomainError::AgentNameTooLong`] when it exceeds 64 characters,
    /// [`AgentDomainError::InvalidAgentName`] for characters outside
    /// `[a-z0-9_-]`, or [`AgentDomainError::ReservedAgentName`] for
    /// `broadcast`.
    pub fn new(value: impl Into<String>) -> Result<Self, AgentDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(AgentDomainError::EmptyAgentName);
        }

        if normalized.len() > MAX_NAME_LENGTH {
            return Err(AgentDomainError::AgentNameTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');

        if !is_valid {
            return Err(AgentDomainError::InvalidAgentName(raw));
        }

        if normalized == BROADCAST {
            return Err(AgentDomainError::ReservedAgentName(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the name the dispatcher sends notices under.
    pub(crate) fn orchestrator() -> Self {
        Self(ORCHESTRATOR.to_owned())
    }

    /// Returns the agent name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentName {
    type Error = AgentDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentName> for String {
    fn from(value: AgentName) -> Self {
        value.0
    }
}

impl AsRef<str> for AgentName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
