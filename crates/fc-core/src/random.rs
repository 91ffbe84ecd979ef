//! Pluggable random draws.
//!
//! All stochastic behaviour in the simulation goes through a [`RandomSource`].
//! Production runs use [`EntropyRandom`]; reproducible runs and tests use
//! [`SeededRandom`] or [`ScriptedRandom`].

use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;

use crate::numeric::Real;

/// Source of uniformly distributed draws over a closed interval.
pub trait RandomSource: Debug {
    /// Next sample of the unit interval `[0, 1)`.
    fn next_unit(&mut self) -> Real;

    /// Draw uniformly from `[lo, hi]`.
    ///
    /// A zero-width or inverted interval yields `lo`. One unit sample is
    /// consumed either way, so the stream position only depends on the
    /// number of draws.
    fn uniform(&mut self, lo: Real, hi: Real) -> Real {
        let u = self.next_unit();
        if !(hi > lo) {
            return lo;
        }
        lo + (hi - lo) * u
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> Real {
        (**self).next_unit()
    }

    fn uniform(&mut self, lo: Real, hi: Real) -> Real {
        (**self).uniform(lo, hi)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> Real {
        (**self).next_unit()
    }

    fn uniform(&mut self, lo: Real, hi: Real) -> Real {
        (**self).uniform(lo, hi)
    }
}

/// Deterministic generator seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> Real {
        self.rng.sample(Standard)
    }
}

/// Generator seeded from operating system entropy.
#[derive(Debug, Clone)]
pub struct EntropyRandom {
    rng: StdRng,
}

impl EntropyRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropyRandom {
    fn next_unit(&mut self) -> Real {
        self.rng.sample(Standard)
    }
}

/// Replays a fixed list of unit samples, cycling when exhausted.
///
/// Samples are clamped into `[0, 1]`. An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    samples: Vec<Real>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(samples: impl Into<Vec<Real>>) -> Self {
        Self {
            samples: samples.into(),
            cursor: 0,
        }
    }

    /// Always returns the same unit sample.
    pub fn constant(sample: Real) -> Self {
        Self::new(vec![sample])
    }

    /// Number of samples drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> Real {
        if self.samples.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        if sample.is_nan() {
            0.0
        } else {
            sample.clamp(0.0, 1.0)
        }
    }
}
