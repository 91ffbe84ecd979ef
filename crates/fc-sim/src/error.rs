//! Error types for simulation setup.

use thiserror::Error;

/// Errors encountered while configuring a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid configuration: {what}")]
    InvalidConfiguration { what: String },
}

pub type SimResult<T> = Result<T, SimError>;
