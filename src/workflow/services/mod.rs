//! Workflow execution service.

mod executor;

pub use executor::{WorkflowError, WorkflowExecutor, WorkflowResult};
