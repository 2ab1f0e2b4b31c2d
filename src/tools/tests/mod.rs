//! Unit tests for the tool catalogue, local host and tool loop.
