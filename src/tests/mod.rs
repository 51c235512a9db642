//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance and rendering tests for the terminal demo.
