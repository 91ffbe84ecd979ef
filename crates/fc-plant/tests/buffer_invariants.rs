//! Property tests for the buffer plant.
//!
//! Checks the pool invariants after every tick:
//! - a single tick never admits more than `max_wip`
//! - output never exceeds pre-tick queue plus the tick's transfer
//! - negative control inputs behave exactly like zero

use fc_core::{ScriptedRandom, SeededRandom};
use fc_plant::{BufferLimits, BufferPlant, Plant, PlantState};
use proptest::prelude::*;

fn seeded(max_wip: u64, max_flow: u64, seed: u64) -> BufferPlant<SeededRandom> {
    BufferPlant::new(BufferLimits::new(max_wip, max_flow), SeededRandom::new(seed))
}

proptest! {
    #[test]
    fn pools_respect_bounds(
        seed in any::<u64>(),
        max_wip in 0u64..100,
        max_flow in 0u64..30,
        inputs in prop::collection::vec(-200.0_f64..200.0, 1..200),
    ) {
        let mut plant = seeded(max_wip, max_flow, seed);
        for u in inputs {
            let before = plant.state();
            let report = plant.step(u);
            let after = plant.state();

            prop_assert!(report.admitted <= max_wip);
            prop_assert!(report.transferred <= before.work_in_progress + report.admitted);
            prop_assert!(report.released <= max_flow);
            prop_assert!(report.output <= before.queued + report.transferred);
            prop_assert_eq!(report.output, after.queued);
            prop_assert_eq!(
                after.work_in_progress,
                before.work_in_progress + report.admitted - report.transferred
            );
            prop_assert_eq!(
                after.queued,
                before.queued + report.transferred - report.released
            );
        }
    }

    #[test]
    fn negative_input_matches_zero(
        seed in any::<u64>(),
        negatives in prop::collection::vec(-1e6_f64..-0.5, 1..100),
    ) {
        let mut a = seeded(50, 10, seed);
        let mut b = seeded(50, 10, seed);
        // Preload both with identical positive history.
        for _ in 0..5 {
            prop_assert_eq!(a.advance(20.0), b.advance(20.0));
        }
        for u in negatives {
            prop_assert_eq!(a.advance(u), b.advance(0.0));
            prop_assert_eq!(a.state(), b.state());
        }
    }
}

#[test]
fn open_loop_output_bounded_by_cumulative_admission() {
    let mut plant = seeded(50, 10, 2024);
    let mut admitted_total = 0u64;
    for _ in 0..1000 {
        let report = plant.step(5.0);
        admitted_total += report.admitted;
        assert!(report.output <= admitted_total);
    }
}

#[test]
fn fresh_plant_is_empty() {
    let plant = seeded(50, 10, 1);
    assert_eq!(plant.state(), PlantState::default());
    assert_eq!(plant.limits(), BufferLimits::new(50, 10));
}

#[test]
fn untransferred_work_accumulates_past_max_wip() {
    // Nothing is ever transferred, so every admission stays in the pool.
    let mut plant = BufferPlant::new(BufferLimits::new(50, 10), ScriptedRandom::constant(0.0));
    for _ in 0..3 {
        let report = plant.step(80.0);
        assert_eq!(report.admitted, 50);
        assert_eq!(report.output, 0);
    }
    assert_eq!(plant.state().work_in_progress, 150);
}
