//! Step definitions for workflow execution scenarios.

pub mod world;

mod given;
mod then;
mod when;
