//! Error handling for the academy backend.

pub mod error_code;

pub use error_code::ErrorCode;
