//! Controller block implementations.
//!
//! The PI law here is the textbook discrete form with a unit sample period:
//!
//! ```text
//! integral[n] = integral[n-1] + e[n]
//! u[n]        = kp * e[n] + ki * integral[n]
//! ```
//!
//! There is no anti-windup and no output clamping. The integral is never
//! reset and can grow without bound under a sustained error.

use fc_core::{Real, ensure_non_negative};
use serde::{Deserialize, Serialize};

use crate::error::ControlResult;

/// Stateful controller advanced once per tick.
pub trait Controller {
    /// Consume one error sample and return the control input.
    fn advance(&mut self, error: Real) -> Real;
}

impl<C: Controller + ?Sized> Controller for &mut C {
    fn advance(&mut self, error: Real) -> Real {
        (**self).advance(error)
    }
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn advance(&mut self, error: Real) -> Real {
        (**self).advance(error)
    }
}

/// PI controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PIController {
    /// Proportional gain.
    pub kp: Real,
    /// Integral gain, applied to the running error sum.
    pub ki: Real,
}

impl PIController {
    /// Create a new PI controller.
    ///
    /// # Arguments
    ///
    /// * `kp` - Proportional gain (non-negative, finite)
    /// * `ki` - Integral gain (non-negative, finite)
    pub fn new(kp: Real, ki: Real) -> ControlResult<Self> {
        let kp = ensure_non_negative(kp, "kp")?;
        let ki = ensure_non_negative(ki, "ki")?;
        Ok(Self { kp, ki })
    }

    /// Compute controller output for one error sample.
    ///
    /// Returns the updated state and the control signal.
    pub fn update(&self, state: &PIControllerState, error: Real) -> (PIControllerState, Real) {
        let integral = state.integral + error;
        let output = self.kp * error + self.ki * integral;
        (PIControllerState { integral }, output)
    }

    /// Pair these gains with a fresh state.
    pub fn into_control(self) -> PIControl {
        PIControl::new(self)
    }
}

/// PI controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PIControllerState {
    /// Sum of every error seen so far.
    pub integral: Real,
}

/// A PI controller together with its running state.
#[derive(Debug, Clone, PartialEq)]
pub struct PIControl {
    config: PIController,
    state: PIControllerState,
}

impl PIControl {
    pub fn new(config: PIController) -> Self {
        Self {
            config,
            state: PIControllerState::default(),
        }
    }

    /// Validate gains and build a controller with a zero integral.
    pub fn with_gains(kp: Real, ki: Real) -> ControlResult<Self> {
        Ok(Self::new(PIController::new(kp, ki)?))
    }

    pub fn config(&self) -> &PIController {
        &self.config
    }

    pub fn state(&self) -> &PIControllerState {
        &self.state
    }
}

impl Controller for PIControl {
    fn advance(&mut self, error: Real) -> Real {
        let (state, output) = self.config.update(&self.state, error);
        self.state = state;
        output
    }
}
