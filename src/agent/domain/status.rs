//! Agent status machine values.

use super::ParseAgentStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operational status of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Ready to accept a task.
    #[default]
    Idle,
    /// Executing a task.
    Working,
    /// Waiting on an external condition.
    Blocked,
    /// The last task failed. The next task is still accepted.
    Error,
}

impl AgentStatus {
    /// Returns the canonical text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Working => "working",
            Self::Blocked => "blocked",
            Self::Error => "error",
        }
    }

    /// Returns `true` when the agent may accept a new task.
    #[must_use]
    pub const fn accepts_tasks(self) -> bool {
        !matches!(self, Self::Working)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = ParseAgentStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "working" => Ok(Self::Working),
            "blocked" => Ok(Self::Blocked),
            "error" => Ok(Self::Error),
            _ => Err(ParseAgentStatusError(value.to_owned())),
        }
    }
}

impl TryFrom<&str> for AgentStatus {
    type Error = ParseAgentStatusError;

    fn try_from(value: &str) -> Result<Self, ParseAgentStatusError> {
        value.parse()
    }
}
