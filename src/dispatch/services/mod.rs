//! Agent registry and dispatcher services.

mod dispatcher;
mod error;
mod registry;

pub use dispatcher::{QueuedTaskReport, TaskDispatcher};
pub use error::{DispatchError, DispatchResult};
pub use registry::AgentRegistry;
