//! Error types for plant construction.

use thiserror::Error;

/// Result type for plant operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors raised while building a plant. Ticking a plant never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    #[error("Invalid configuration: {what} = {value}")]
    InvalidConfiguration { what: &'static str, value: i64 },
}
