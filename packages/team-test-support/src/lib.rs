//! Test support utilities for the team-draft workspace.
//!
//! This crate provides unified logging initialization, roster fixtures and
//! the shared proptest configuration used by unit and integration tests.

pub mod fixtures;
pub mod logging;
pub mod proptest_prelude;
