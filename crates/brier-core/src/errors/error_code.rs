//! BrierErrorCode trait for stable, machine-readable error codes.

/// Every error type exposes a stable code string for tooling and tests.
pub trait BrierErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const VALIDATION_WARNING: &str = "VALIDATION_WARNING";
