//! Task dispatcher.
//!
//! The dispatcher routes a task to the agent named in
//! `task.assigned_agent`, drives the task through `in_progress` to
//! `completed` or `failed`, records the outcome in the shared state store and
//! publishes bus notices. It never retries.

pub mod services;

#[cfg(test)]
mod tests;
