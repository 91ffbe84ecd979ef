//! Buffered work pipeline.
//!
//! Each tick runs three stages in order:
//!
//! 1. **Admission**: the control input is rounded (halves to even) and
//!    clamped to `[0, max_wip]`, then added to the ready pool.
//! 2. **Transfer**: a uniform draw over `[0, wip]` moves work from the ready
//!    pool into the queue.
//! 3. **Release**: a uniform draw over `[0, max_flow]`, capped by the queue
//!    length, leaves the plant.
//!
//! The post-release queue length is the measured output. Average outflow is
//! `max_flow / 2` per tick.

use fc_core::{EntropyRandom, RandomSource, Real, round_to_count};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{PlantError, PlantResult};
use crate::traits::Plant;

/// Fixed capacities of a [`BufferPlant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferLimits {
    /// Hard cap on admission per tick.
    pub max_wip: u64,
    /// Upper bound of the per-tick release draw.
    pub max_flow: u64,
}

impl BufferLimits {
    pub fn new(max_wip: u64, max_flow: u64) -> Self {
        Self { max_wip, max_flow }
    }

    /// Build limits from signed values, rejecting negatives.
    pub fn try_from_signed(max_wip: i64, max_flow: i64) -> PlantResult<Self> {
        let max_wip = u64::try_from(max_wip).map_err(|_| PlantError::InvalidConfiguration {
            what: "max_wip",
            value: max_wip,
        })?;
        let max_flow = u64::try_from(max_flow).map_err(|_| PlantError::InvalidConfiguration {
            what: "max_flow",
            value: max_flow,
        })?;
        Ok(Self { max_wip, max_flow })
    }
}

/// Snapshot of the mutable pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantState {
    /// Items waiting for downstream release.
    pub queued: u64,
    /// Items admitted but not yet transferred to the queue.
    pub work_in_progress: u64,
}

/// Per-stage breakdown of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub admitted: u64,
    pub transferred: u64,
    pub released: u64,
    /// Queue length after release; the measured output.
    pub output: u64,
}

/// Stochastic three-stage buffer.
#[derive(Debug, Clone)]
pub struct BufferPlant<R = EntropyRandom> {
    limits: BufferLimits,
    state: PlantState,
    rng: R,
}

impl BufferPlant<EntropyRandom> {
    /// Buffer with empty pools drawing from OS entropy.
    pub fn with_entropy(max_wip: u64, max_flow: u64) -> Self {
        Self::new(BufferLimits::new(max_wip, max_flow), EntropyRandom::new())
    }
}

impl<R: RandomSource> BufferPlant<R> {
    /// Buffer with empty pools.
    pub fn new(limits: BufferLimits, rng: R) -> Self {
        Self {
            limits,
            state: PlantState::default(),
            rng,
        }
    }

    pub fn limits(&self) -> BufferLimits {
        self.limits
    }

    pub fn state(&self) -> PlantState {
        self.state
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Run one tick and report every stage.
    pub fn step(&mut self, control_input: Real) -> TickReport {
        let admitted = round_to_count(control_input, self.limits.max_wip);
        if control_input > self.limits.max_wip as Real {
            debug!(control_input, admitted, "admission clamped to max_wip");
        }
        self.state.work_in_progress = self.state.work_in_progress.saturating_add(admitted);

        let wip = self.state.work_in_progress;
        let transferred = round_to_count(self.rng.uniform(0.0, wip as Real), wip);
        self.state.work_in_progress -= transferred;
        self.state.queued = self.state.queued.saturating_add(transferred);

        let max_flow = self.limits.max_flow;
        let released = round_to_count(self.rng.uniform(0.0, max_flow as Real), max_flow)
            .min(self.state.queued);
        self.state.queued -= released;

        trace!(admitted, transferred, released, queued = self.state.queued, "buffer tick");
        TickReport {
            admitted,
            transferred,
            released,
            output: self.state.queued,
        }
    }
}

impl<R: RandomSource> Plant for BufferPlant<R> {
    fn advance(&mut self, control_input: Real) -> u64 {
        self.step(control_input).output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::ScriptedRandom;

    fn scripted(max_wip: u64, max_flow: u64, samples: Vec<Real>) -> BufferPlant<ScriptedRandom> {
        BufferPlant::new(
            BufferLimits::new(max_wip, max_flow),
            ScriptedRandom::new(samples),
        )
    }

    #[test]
    fn limits_reject_negative_values() {
        assert_eq!(
            BufferLimits::try_from_signed(-1, 10),
            Err(PlantError::InvalidConfiguration {
                what: "max_wip",
                value: -1
            })
        );
        assert_eq!(
            BufferLimits::try_from_signed(50, -3),
            Err(PlantError::InvalidConfiguration {
                what: "max_flow",
                value: -3
            })
        );
        assert_eq!(
            BufferLimits::try_from_signed(50, 10),
            Ok(BufferLimits::new(50, 10))
        );
    }

    #[test]
    fn full_transfer_and_no_release() {
        // transfer draw = 1.0 (everything), release draw = 0.0
        let mut plant = scripted(50, 10, vec![1.0, 0.0]);
        let report = plant.step(5.0);
        assert_eq!(report.admitted, 5);
        assert_eq!(report.transferred, 5);
        assert_eq!(report.released, 0);
        assert_eq!(report.output, 5);
        assert_eq!(
            plant.state(),
            PlantState {
                queued: 5,
                work_in_progress: 0
            }
        );
    }

    #[test]
    fn release_capped_by_queue() {
        // transfer nothing, release the maximum
        let mut plant = scripted(50, 10, vec![0.0, 1.0]);
        let report = plant.step(8.0);
        assert_eq!(report.transferred, 0);
        assert_eq!(report.released, 0);
        assert_eq!(report.output, 0);
        assert_eq!(plant.state().work_in_progress, 8);
    }

    #[test]
    fn admission_clamped_to_max_wip() {
        let mut plant = scripted(50, 10, vec![0.0]);
        let report = plant.step(1e9);
        assert_eq!(report.admitted, 50);
        assert_eq!(plant.state().work_in_progress, 50);
    }

    #[test]
    fn negative_input_admits_nothing() {
        let mut plant = scripted(50, 10, vec![0.5]);
        let report = plant.step(-12.7);
        assert_eq!(report.admitted, 0);
        assert_eq!(plant.state(), PlantState::default());
    }

    #[test]
    fn transfer_draw_rounds_half_to_even() {
        // wip = 5, draw 0.5 -> 2.5 -> 2
        let mut plant = scripted(50, 10, vec![0.5, 0.0]);
        let report = plant.step(5.0);
        assert_eq!(report.transferred, 2);
        assert_eq!(plant.state().work_in_progress, 3);
        assert_eq!(plant.state().queued, 2);
    }

    #[test]
    fn partial_release() {
        // wip 10 -> transfer all; release 0.3 * 10 = 3
        let mut plant = scripted(50, 10, vec![1.0, 0.3]);
        let report = plant.step(10.0);
        assert_eq!(report.released, 3);
        assert_eq!(report.output, 7);
    }

    #[test]
    fn zero_capacities_are_inert() {
        let mut plant = scripted(0, 0, vec![0.7]);
        for _ in 0..10 {
            assert_eq!(plant.advance(25.0), 0);
        }
        assert_eq!(plant.state(), PlantState::default());
    }

    #[test]
    fn advance_through_trait_object() {
        let mut plant: Box<dyn Plant> = Box::new(scripted(50, 10, vec![1.0, 0.0]));
        assert_eq!(plant.advance(4.0), 4);
        assert_eq!(plant.advance(4.0), 8);
    }
}
