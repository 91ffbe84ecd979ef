//! fc-core: shared foundation for flowctl.
//!
//! Contains:
//! - numeric (Real + TimeStep + validation and rounding helpers)
//! - random (pluggable, seedable uniform draws)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod random;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FcError, FcResult};
pub use numeric::*;
pub use random::{EntropyRandom, RandomSource, ScriptedRandom, SeededRandom};
