//! Internal test modules - whitebox tests with crate access
//!
//! Scenario and property tests that drive the widget end to end with
//! internal access to its state.
