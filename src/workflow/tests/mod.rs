//! Unit tests for workflow definitions and execution.
