//! Message kinds.

use super::ParseMessageKindError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A task handed to an agent.
    Task,
    /// A successful task result.
    Result,
    /// A task failure.
    Error,
    /// A question for another agent.
    Query,
    /// A status notice.
    Status,
}

impl MessageKind {
    /// Returns the canonical text representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Result => "result",
            Self::Error => "error",
            Self::Query => "query",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = ParseMessageKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "task" => Ok(Self::Task),
            "result" => Ok(Self::Result),
            "error" => Ok(Self::Error),
            "query" => Ok(Self::Query),
            "status" => Ok(Self::Status),
            _ => Err(ParseMessageKindError(value.to_owned())),
        }
    }
}

impl TryFrom<&str> for MessageKind {
    type Error = ParseMessageKindError;

    fn try_from(value: &str) -> Result<Self, ParseMessageKindError> {
        value.parse()
    }
}
