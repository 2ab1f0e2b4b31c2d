//! Unit tests for the shared state store.
