//! Shared state store service.

mod store;

pub use store::{SharedStateStore, StateStoreError, StateStoreResult};
