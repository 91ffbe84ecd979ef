//! Discrete-time simulation driver for flowctl.
//!
//! Provides:
//! - Time-indexed setpoint policies (constant, piecewise, closures)
//! - Fixed-schema per-tick records
//! - Open-loop and closed-loop drivers sharing one tick skeleton

pub mod driver;
pub mod error;
pub mod record;
pub mod setpoint;

// Re-exports for public API
pub use driver::{INITIAL_OUTPUT, run, run_closed_loop, run_open_loop};
pub use error::{SimError, SimResult};
pub use record::{LoopMode, SimulationRecord};
pub use setpoint::{
    ConstantSetpoint, PiecewiseSetpoint, Setpoint, SetpointStep, reference_schedule,
    reference_target,
};
