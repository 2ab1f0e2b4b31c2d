//! Named workflow definitions.

use super::{WorkflowDefinitionError, WorkflowStep};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// A named sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDefinition")]
pub struct WorkflowDefinition {
    description: Option<String>,
    trigger: Option<String>,
    steps: Vec<WorkflowStep>,
}

#[derive(Deserialize)]
struct RawDefinition {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    trigger: Option<String>,
    steps: Vec<WorkflowStep>,
}

impl TryFrom<RawDefinition> for WorkflowDefinition {
    type Error = WorkflowDefinitionError;

    fn try_from(raw: RawDefinition) -> Result<Self, Self::Error> {
        Self::new(raw.steps).map(|definition| Self {
            description: raw.description,
            trigger: raw.trigger,
            ..definition
        })
    }
}

impl WorkflowDefinition {
    /// Creates a definition from `steps`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDefinitionError::DuplicateStepId`] when two steps
    /// share an identifier.
    pub fn new(steps: Vec<WorkflowStep>) -> Result<Self, WorkflowDefinitionError> {
        let mut seen = BTreeSet::new();
        for step in &steps {
            if !seen.insert(step.id()) {
                return Err(WorkflowDefinitionError::DuplicateStepId(step.id().clone()));
            }
        }
        Ok(Self {
            description: None,
            trigger: None,
            steps,
        })
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the trigger label, if any.
    #[must_use]
    pub fn trigger(&self) -> Option<&str> {
        self.trigger.as_deref()
    }

    /// Returns the steps in declared order.
    #[must_use]
    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }
}

#[derive(Deserialize)]
struct CatalogDocument {
    workflows: BTreeMap<String, WorkflowDefinition>,
}

/// Workflow definitions keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowCatalog {
    workflows: BTreeMap<String, WorkflowDefinition>,
}

impl WorkflowCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `{"workflows": {name: {steps: [...]}}}` document.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDefinitionError::Malformed`] when the text does not
    /// match the expected shape, including duplicate step identifiers.
    pub fn from_json(text: &str) -> Result<Self, WorkflowDefinitionError> {
        let document: CatalogDocument = serde_json::from_str(text)
            .map_err(|err| WorkflowDefinitionError::Malformed(err.to_string()))?;
        Ok(Self {
            workflows: document.workflows,
        })
    }

    /// Adds or replaces a workflow.
    #[must_use]
    pub fn with_workflow(mut self, name: impl Into<String>, definition: WorkflowDefinition) -> Self {
        self.workflows.insert(name.into(), definition);
        self
    }

    /// Returns the workflow called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&WorkflowDefinition> {
        self.workflows.get(name)
    }

    /// Returns the workflow names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.workflows.keys().map(String::as_str).collect()
    }
}
