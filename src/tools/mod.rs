//! Tool catalogue and the tool-call round trip.
//!
//! A completion may contain `tool_use` blocks. The [`services::ToolLoop`]
//! executes each request in order against a [`ports::ToolHost`] and returns
//! one correlated `tool_result` block per request. Individual tool failures
//! become error results; only an unknown tool name aborts the loop.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
