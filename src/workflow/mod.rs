//! Workflow definitions and the sequential workflow executor.
//!
//! A workflow is an ordered list of steps. The executor walks the list in
//! declared order, skips steps whose dependencies did not complete earlier in
//! the same run, and stops at the first failing required step.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
