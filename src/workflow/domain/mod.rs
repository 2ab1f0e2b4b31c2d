//! Workflow definition values.

mod catalog;
mod error;
mod result;
mod step;

pub use catalog::{WorkflowCatalog, WorkflowDefinition};
pub use error::WorkflowDefinitionError;
pub use result::StepResult;
pub use step::{StepHook, WorkflowStep};
