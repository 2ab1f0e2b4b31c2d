//! Workflow definition errors.

use crate::task::domain::StepId;
use thiserror::Error;

/// Errors returned while loading workflow definitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDefinitionError {
    /// Two steps in one workflow share an identifier.
    #[error("duplicate step id '{0}'")]
    DuplicateStepId(StepId),

    /// The definition text is not valid JSON of the expected shape.
    #[error("malformed workflow definition: {0}")]
    Malformed(String),
}
