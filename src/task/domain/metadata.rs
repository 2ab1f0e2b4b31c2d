//! Structured metadata attached to tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Context key under which the previous step's result is exposed.
const PREVIOUS_RESULT_KEY: &str = "previousResult";

/// Mutable context threaded through a workflow run.
///
/// The context starts as the caller-supplied map and accumulates the result
/// of each step that declares an `onSuccess` hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowContext(Map<String, Value>);

impl WorkflowContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context from an existing JSON object.
    #[must_use]
    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Inserts or replaces a context value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the result carried over from the last hooked step, if any.
    #[must_use]
    pub fn previous_result(&self) -> Option<&Value> {
        self.get(PREVIOUS_RESULT_KEY)
    }

    /// Stores a step result for subsequent steps.
    pub fn set_previous_result(&mut self, result: Value) {
        self.0.insert(PREVIOUS_RESULT_KEY.to_owned(), result);
    }

    /// Returns the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Tagged metadata union validated at construction.
///
/// Each variant corresponds to one shape of metadata that agents understand.
/// Serialisation emits the plain JSON shape without a tag so prompts and
/// snapshots show the metadata as the author wrote it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskMetadata {
    /// No metadata.
    #[default]
    Empty,
    /// Workflow context supplied by the workflow executor.
    Context(WorkflowContext),
    /// Requirement statements for implementation work.
    Requirements {
        /// Non-empty list of non-blank requirements.
        requirements: Vec<String>,
    },
    /// Files an action should focus on.
    Files {
        /// Non-empty list of non-blank paths.
        files: Vec<String>,
    },
    /// Any other JSON object.
    Custom(Map<String, Value>),
}

impl TaskMetadata {
    /// Creates requirements metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidMetadata`] when the list is empty or
    /// contains a blank entry.
    pub fn requirements(
        requirements: impl IntoIterator<Item = String>,
    ) -> Result<Self, TaskDomainError> {
        let requirements = non_blank_list("requirements", requirements)?;
        Ok(Self::Requirements { requirements })
    }

    /// Creates file-list metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidMetadata`] when the list is empty or
    /// contains a blank entry.
    pub fn files(files: impl IntoIterator<Item = String>) -> Result<Self, TaskDomainError> {
        let files = non_blank_list("files", files)?;
        Ok(Self::Files { files })
    }

    /// Classifies free-form JSON metadata by its shape.
    ///
    /// `null` and `{}` become [`TaskMetadata::Empty`]. An object whose only
    /// key is `requirements` or `files` must hold a non-empty list of strings,
    /// or a single string read as a one-element list, and becomes the
    /// matching variant. Any other object is kept as [`TaskMetadata::Custom`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidMetadata`] for non-object values and
    /// for malformed `requirements` or `files` lists.
    pub fn from_value(value: Value) -> Result<Self, TaskDomainError> {
        let map = match value {
            Value::Null => return Ok(Self::Empty),
            Value::Object(map) => map,
            other => {
                return Err(TaskDomainError::InvalidMetadata(format!(
                    "expected a JSON object, found {other}"
                )));
            }
        };

        if map.is_empty() {
            return Ok(Self::Empty);
        }

        if map.len() == 1 {
            if let Some(list) = map.get("requirements") {
                return Self::requirements(string_list("requirements", list)?);
            }
            if let Some(list) = map.get("files") {
                return Self::files(string_list("files", list)?);
            }
        }

        Ok(Self::Custom(map))
    }

    /// Returns the metadata as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Empty => Value::Object(Map::new()),
            Self::Context(context) => Value::Object(context.as_map().clone()),
            Self::Requirements { requirements } => {
                serde_json::json!({ "requirements": requirements })
            }
            Self::Files { files } => serde_json::json!({ "files": files }),
            Self::Custom(map) => Value::Object(map.clone()),
        }
    }

    /// Returns the workflow context when the metadata carries one.
    #[must_use]
    pub const fn context(&self) -> Option<&WorkflowContext> {
        match self {
            Self::Context(context) => Some(context),
            _ => None,
        }
    }
}

fn string_list(field: &str, value: &Value) -> Result<Vec<String>, TaskDomainError> {
    if let Some(single) = value.as_str() {
        return Ok(vec![single.to_owned()]);
    }
    let items = value.as_array().ok_or_else(|| {
        TaskDomainError::InvalidMetadata(format!("{field} must be a list of strings"))
    })?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                TaskDomainError::InvalidMetadata(format!("{field} must be a list of strings"))
            })
        })
        .collect()
}

fn non_blank_list(
    field: &str,
    values: impl IntoIterator<Item = String>,
) -> Result<Vec<String>, TaskDomainError> {
    let list: Vec<String> = values.into_iter().map(|v| v.trim().to_owned()).collect();
    if list.is_empty() {
        return Err(TaskDomainError::InvalidMetadata(format!(
            "{field} must not be empty"
        )));
    }
    if list.iter().any(String::is_empty) {
        return Err(TaskDomainError::InvalidMetadata(format!(
            "{field} must not contain blank entries"
        )));
    }
    Ok(list)
}
