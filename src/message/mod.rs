//! In-process message bus for inter-agent notices.
//!
//! Every sent message is stamped and kept in an append-only history.
//! Delivery is synchronous: `send` invokes matching subscriber callbacks in
//! subscription order before it returns, and the first callback error is
//! returned to the sender. Publishers are responsible for subscribers that
//! can fail.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
