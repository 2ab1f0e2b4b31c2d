//! Shared state store.
//!
//! One aggregate holds agent states, the FIFO task queue, the completed-task
//! history, the modified-file set, project key/values and counters. Every
//! operation takes the store lock once, so a [`domain::StateSnapshot`] is a
//! consistent view at a single instant.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
