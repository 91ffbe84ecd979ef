//! Per-tick simulation records.

use fc_core::{Real, TimeStep};
use serde::{Deserialize, Serialize};

/// Which loop produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Setpoint applied directly as the control input.
    OpenLoop,
    /// Control input computed from setpoint minus previous output.
    ClosedLoop,
}

/// One row of the simulation time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub time_step: TimeStep,
    pub set_point: Real,
    /// Setpoint minus the previous output. Always zero in open loop.
    pub residue: Real,
    /// Value handed to the plant, before its rounding and clamping.
    pub control_signal: Real,
    /// Plant output after this tick.
    pub output: u64,
}
