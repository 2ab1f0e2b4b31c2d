//! Requirement planning.
//!
//! The [`services::Planner`] asks the completion gateway to break
//! requirements into a JSON task plan and then dispatches the planned tasks
//! in order, skipping those whose dependencies did not complete.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
