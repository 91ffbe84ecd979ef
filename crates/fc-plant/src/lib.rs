//! Plant models for flowctl.
//!
//! A plant consumes one control input per tick and returns a measured output.
//! The only model shipped is [`BufferPlant`], a three-stage stochastic work
//! pipeline: admission into a ready pool, random transfer into a queue, and
//! random release downstream.

pub mod buffer;
pub mod error;
pub mod traits;

pub use buffer::{BufferLimits, BufferPlant, PlantState, TickReport};
pub use error::{PlantError, PlantResult};
pub use traits::Plant;
