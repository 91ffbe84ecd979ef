//! Time-indexed setpoint policies.
//!
//! A setpoint maps a tick index to the desired plant output. Any
//! `Fn(TimeStep) -> Real` closure is a setpoint; the named types below cover
//! the shapes that scenario files can describe.

use fc_core::{Real, TimeStep};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Desired output as a function of time.
pub trait Setpoint {
    fn at(&self, t: TimeStep) -> Real;
}

impl<F> Setpoint for F
where
    F: Fn(TimeStep) -> Real,
{
    fn at(&self, t: TimeStep) -> Real {
        self(t)
    }
}

/// Same value at every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantSetpoint {
    pub value: Real,
}

impl ConstantSetpoint {
    pub fn new(value: Real) -> Self {
        Self { value }
    }
}

impl Setpoint for ConstantSetpoint {
    fn at(&self, _t: TimeStep) -> Real {
        self.value
    }
}

/// Switch to `value` starting at tick `from_tick`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetpointStep {
    pub from_tick: TimeStep,
    pub value: Real,
}

/// Piecewise-constant schedule.
///
/// Holds `initial` until the first step, then each step's value until the
/// next one takes over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseSetpoint {
    initial: Real,
    steps: Vec<SetpointStep>,
}

impl PiecewiseSetpoint {
    /// Build a schedule. Step ticks must be strictly increasing.
    pub fn new(initial: Real, steps: Vec<SetpointStep>) -> SimResult<Self> {
        if let Some(pair) = steps.windows(2).find(|w| w[1].from_tick <= w[0].from_tick) {
            return Err(SimError::InvalidConfiguration {
                what: format!(
                    "setpoint steps must be strictly increasing (tick {} follows {})",
                    pair[1].from_tick, pair[0].from_tick
                ),
            });
        }
        Ok(Self { initial, steps })
    }

    pub fn initial(&self) -> Real {
        self.initial
    }

    pub fn steps(&self) -> &[SetpointStep] {
        &self.steps
    }

    /// Index of the segment active at `t`; 0 is the initial segment.
    pub fn segment_index(&self, t: TimeStep) -> usize {
        self.steps.partition_point(|s| s.from_tick <= t)
    }
}

impl Setpoint for PiecewiseSetpoint {
    fn at(&self, t: TimeStep) -> Real {
        match self.segment_index(t) {
            0 => self.initial,
            n => self.steps[n - 1].value,
        }
    }
}

/// Open-loop demonstration target: a constant 5 items per tick.
pub fn reference_target() -> ConstantSetpoint {
    ConstantSetpoint::new(5.0)
}

/// Closed-loop demonstration schedule: 0, then 50 from tick 100, then 10
/// from tick 300.
pub fn reference_schedule() -> PiecewiseSetpoint {
    PiecewiseSetpoint {
        initial: 0.0,
        steps: vec![
            SetpointStep {
                from_tick: 100,
                value: 50.0,
            },
            SetpointStep {
                from_tick: 300,
                value: 10.0,
            },
        ],
    }
}
