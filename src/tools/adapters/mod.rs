//! Tool host adapters.

mod local;

pub use local::LocalToolHost;
