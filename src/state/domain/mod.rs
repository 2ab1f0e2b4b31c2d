//! Values stored in and read from the shared state store.

mod metrics;
mod records;

pub use metrics::StateMetrics;
pub use records::{AgentStateEntry, CompletedTaskRecord, RecordedOutcome, StateSnapshot};
