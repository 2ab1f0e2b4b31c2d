//! Domain model for agents.

mod error;
mod name;
mod profile;
mod records;
mod report;
mod status;

pub use error::{AgentDomainError, ParseAgentStatusError};
pub(crate) use name::BROADCAST;
pub use name::AgentName;
pub use profile::{AgentProfile, PromptTemplates, ReportStyle};
pub use records::{AgentState, ErrorRecord, ResultRecord};
pub use report::{AgentReport, ReportExtras, ValidationSummary};
pub(crate) use report::requested_writes;
pub use status::AgentStatus;
