//! Agent abstraction.
//!
//! An agent is a capability-bearing worker that accepts one task at a time,
//! keeps its own status machine (`idle -> working -> {idle, error}`), and owns
//! a conversation log used as context for the completion gateway. Agents are
//! polymorphic through the [`ports::Agent`] trait; the bundled
//! [`adapters::LlmAgent`] is configured by an [`domain::AgentProfile`]
//! strategy value rather than by subclassing.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
