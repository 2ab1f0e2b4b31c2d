//! Port contracts for completion backends.

mod gateway;

pub use gateway::{CompletionError, CompletionGateway, CompletionResult};
