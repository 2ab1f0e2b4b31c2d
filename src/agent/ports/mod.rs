//! Port contracts for task-executing agents.

mod agent;

#[cfg(test)]
pub use agent::MockAgent;
pub use agent::{Agent, AgentError, AgentResult};
