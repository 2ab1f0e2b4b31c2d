//! Message values and history filters.

mod error;
mod filter;
mod kind;
mod message;
mod recipient;

pub use error::{DeliveryError, ParseMessageKindError};
pub use filter::HistoryFilter;
pub use kind::MessageKind;
pub use message::{AgentMessage, OutboundMessage};
pub use recipient::Recipient;
