//! Backend test support utilities
//!
//! Shared helpers for the roshambo integration tests: one-time logging
//! initialization, unique player names, and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
