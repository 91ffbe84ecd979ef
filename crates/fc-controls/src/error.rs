//! Error types for control system operations.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control system operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Gain or other configuration value out of range.
    #[error("Invalid configuration: {what} = {value}")]
    InvalidConfiguration { what: &'static str, value: f64 },
}

impl From<fc_core::FcError> for ControlError {
    fn from(e: fc_core::FcError) -> Self {
        match e {
            fc_core::FcError::InvalidConfiguration { what, value } => {
                ControlError::InvalidConfiguration { what, value }
            }
        }
    }
}
