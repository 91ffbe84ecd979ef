//! Feedback controllers for flowctl.
//!
//! Controllers turn an instantaneous error (setpoint minus measured output)
//! into a control input for the plant. They never clamp their output;
//! saturation is the plant's job on admission.
//!
//! The PI law is split the same way as the rest of the workspace splits
//! config from state:
//! - [`PIController`] holds the immutable gains and a pure `update`
//! - [`PIControllerState`] holds the running integral
//! - [`PIControl`] pairs the two behind the stateful [`Controller`] trait

pub mod controller;
pub mod error;

pub use controller::{Controller, PIControl, PIController, PIControllerState};
pub use error::{ControlError, ControlResult};
