//! Error types for the fc-app service layer.

/// Application error type that wraps errors from the backend crates and
/// provides one error interface for every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Project(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fc-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<fc_project::ProjectError> for AppError {
    fn from(err: fc_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<fc_project::ValidationError> for AppError {
    fn from(err: fc_project::ValidationError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<fc_plant::PlantError> for AppError {
    fn from(err: fc_plant::PlantError) -> Self {
        AppError::InvalidConfiguration(err.to_string())
    }
}

impl From<fc_controls::ControlError> for AppError {
    fn from(err: fc_controls::ControlError) -> Self {
        AppError::InvalidConfiguration(err.to_string())
    }
}

impl From<fc_sim::SimError> for AppError {
    fn from(err: fc_sim::SimError) -> Self {
        AppError::InvalidConfiguration(err.to_string())
    }
}

impl From<fc_results::ResultsError> for AppError {
    fn from(err: fc_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
