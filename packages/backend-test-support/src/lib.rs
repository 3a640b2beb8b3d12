//! Backend test support utilities
//!
//! Logging initialization and Problem Details assertions shared by the
//! backend's unit and integration tests.

pub mod logging;
pub mod problem_details;

pub use problem_details::assert_problem_details;
