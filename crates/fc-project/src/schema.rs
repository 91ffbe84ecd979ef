//! Scenario schema definitions.
//!
//! Integer fields are signed so that a negative value in a scenario file is
//! reported by validation instead of failing to parse.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// Tick count used when a scenario does not give one.
pub const DEFAULT_TOTAL_TICKS: i64 = 5000;

fn default_total_ticks() -> i64 {
    DEFAULT_TOTAL_TICKS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    /// Fixed seed for reproducible runs; entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default = "default_total_ticks")]
    pub total_ticks: i64,
    pub plant: PlantDef,
    /// Present for closed loop, absent for open loop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerDef>,
    pub setpoint: SetpointDef,
}

impl Scenario {
    pub fn is_closed_loop(&self) -> bool {
        self.controller.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlantDef {
    pub max_wip: i64,
    pub max_flow: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ControllerDef {
    pub kp: f64,
    pub ki: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SetpointDef {
    Constant {
        value: f64,
    },
    Piecewise {
        initial: f64,
        #[serde(default)]
        steps: Vec<SetpointStepDef>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SetpointStepDef {
    pub from_tick: i64,
    pub value: f64,
}
