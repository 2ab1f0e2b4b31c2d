//! Message bus service.

mod bus;

pub use bus::{MessageBus, MessageBusError, MessageBusResult, MessageCallback};
