//! Task and workflow-step value model.
//!
//! Tasks are the unit of work handed to agents. A task carries its action,
//! description, validated metadata, and dependency identifiers, and moves
//! through a monotonic status machine
//! (`pending -> in_progress -> {completed, failed}`) driven solely by the
//! dispatcher. The module holds only values; orchestration lives in
//! [`crate::dispatch`] and [`crate::workflow`].

pub mod domain;

#[cfg(test)]
mod tests;
