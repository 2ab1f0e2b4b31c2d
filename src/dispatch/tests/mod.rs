//! Unit tests for the dispatcher and registry.
