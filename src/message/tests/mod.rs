//! Unit tests for message values and the bus.

mod bus_tests;
