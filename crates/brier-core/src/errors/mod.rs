//! Error handling for Brier.
//! One error type per subsystem, `thiserror` only.

pub mod config_error;
pub mod diagnostic;
pub mod error_code;

pub use config_error::ConfigError;
pub use diagnostic::{Diagnostic, Severity, ValidationError};
pub use error_code::BrierErrorCode;
