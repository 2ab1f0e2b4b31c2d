//! Unit tests for agent domain values and the completion-backed agent.
