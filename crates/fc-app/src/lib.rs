//! Shared application service layer for flowctl.
//!
//! Turns validated scenarios into runnable plants, controllers and setpoints,
//! executes them, and packages the series with a summary. Used by the CLI;
//! any other frontend goes through the same calls.

pub mod error;
pub mod run_service;
pub mod runtime_compile;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use run_service::{
    ReferenceOutcome, RunOutcome, SETTLE_WINDOW, run_reference, run_scenario, run_with,
};
pub use runtime_compile::{
    ScenarioPlant, build_controller, build_plant, build_setpoint, random_source, total_ticks,
};
