//! Task plan values and plan extraction.

mod extract;
mod plan;

pub use extract::{PlanParseError, extract_plan};
pub use plan::{PlannedTask, TaskPlan};
