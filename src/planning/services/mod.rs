//! Planning service.

mod planner;

pub use planner::{Planner, PlanningError, PlanningResult};
