//! Extraction of a JSON plan from free-form completion text.

use super::TaskPlan;
use thiserror::Error;

/// Errors returned while reading a plan from completion text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanParseError {
    /// The text contains no `{...}` span.
    #[error("completion text contains no JSON object")]
    NoJsonObject,

    /// The span is not a valid plan.
    #[error("malformed task plan: {0}")]
    Malformed(String),
}

/// Parses the span from the first `{` to the last `}` of `text` as a plan.
///
/// # Errors
///
/// Returns [`PlanParseError::NoJsonObject`] when no such span exists, or
/// [`PlanParseError::Malformed`] when the span does not decode.
pub fn extract_plan(text: &str) -> Result<TaskPlan, PlanParseError> {
    let span = text
        .find('{')
        .zip(text.rfind('}'))
        .filter(|(start, end)| start < end)
        .and_then(|(start, end)| text.get(start..=end))
        .ok_or(PlanParseError::NoJsonObject)?;
    serde_json::from_str(span).map_err(|err| PlanParseError::Malformed(err.to_string()))
}
