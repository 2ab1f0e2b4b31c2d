//! Unit tests for completion values and the scripted gateway.

mod scripted_tests;
