//! Integration test: closed-loop residue trends toward zero within each
//! setpoint segment of the reference schedule.
//!
//! The plant is stochastic, so every check averages several seeded runs and
//! compares windows of the residue series instead of exact values.

use fc_controls::PIControl;
use fc_core::SeededRandom;
use fc_plant::{BufferLimits, BufferPlant};
use fc_results::{TimeSeries, rolling_mae, segment_convergence, segments, summarize};
use fc_sim::{reference_schedule, reference_target, run_closed_loop, run_open_loop};

const SEEDS: std::ops::Range<u64> = 1000..1008;
const SETTLE: usize = 20;

fn closed_series(seed: u64) -> TimeSeries {
    let mut pi = PIControl::with_gains(1.25, 0.01).unwrap();
    let mut plant = BufferPlant::new(BufferLimits::new(50, 10), SeededRandom::new(seed));
    let records = run_closed_loop(&mut pi, &mut plant, &reference_schedule(), 1000);
    TimeSeries::from_records(&records)
}

#[test]
fn reference_run_has_three_segments() {
    let series = closed_series(1);
    let segs = segments(&series);
    assert_eq!(segs.len(), 3);
    assert_eq!((segs[0].start, segs[0].end, segs[0].set_point), (0, 100, 0.0));
    assert_eq!((segs[1].start, segs[1].end, segs[1].set_point), (100, 300, 50.0));
    assert_eq!((segs[2].start, segs[2].end, segs[2].set_point), (300, 1000, 10.0));
}

#[test]
fn residue_shrinks_after_each_setpoint_switch() {
    let mut early = [0.0; 3];
    let mut late = [0.0; 3];
    for seed in SEEDS {
        let conv = segment_convergence(&closed_series(seed), SETTLE).unwrap();
        assert_eq!(conv.len(), 3);
        for (i, c) in conv.iter().enumerate() {
            early[i] += c.early_mae;
            late[i] += c.late_mae.unwrap_or(0.0);
        }
    }
    // Zero setpoint on an empty plant: nothing to correct.
    assert_eq!(early[0], 0.0);
    assert_eq!(late[0], 0.0);
    for i in 1..3 {
        assert!(
            late[i] < early[i],
            "segment {i}: late {} >= early {}",
            late[i],
            early[i]
        );
    }
}

#[test]
fn rolling_mae_falls_from_segment_start() {
    // Average the rolling MAE curve of the 50-unit segment over several runs.
    let window = SETTLE;
    let mut curve: Vec<f64> = Vec::new();
    for seed in SEEDS {
        let series = closed_series(seed);
        let mae = rolling_mae(&series.residue[100..300], window).unwrap();
        if curve.is_empty() {
            curve = mae;
        } else {
            for (acc, v) in curve.iter_mut().zip(mae) {
                *acc += v;
            }
        }
    }
    assert_eq!(curve.len(), 200 - window + 1);
    let first = curve[0];
    let tail = &curve[curve.len() / 2..];
    let tail_mean = tail.iter().sum::<f64>() / tail.len() as f64;
    assert!(tail_mean < first, "tail {tail_mean} >= first {first}");
}

#[test]
fn open_loop_has_no_residue() {
    let mut plant = BufferPlant::new(BufferLimits::new(50, 10), SeededRandom::new(4));
    let records = run_open_loop(&mut plant, &reference_target(), 1000);
    let summary = summarize(&TimeSeries::from_records(&records), SETTLE).unwrap();
    assert_eq!(summary.ticks, 1000);
    assert_eq!(summary.mean_abs_residue, Some(0.0));
    assert_eq!(summary.residue_sum, 0.0);
    assert_eq!(summary.segments.len(), 1);
}

#[test]
fn summary_residue_sum_matches_controller_integral() {
    let mut pi = PIControl::with_gains(1.25, 0.01).unwrap();
    let mut plant = BufferPlant::new(BufferLimits::new(50, 10), SeededRandom::new(77));
    let records = run_closed_loop(&mut pi, &mut plant, &reference_schedule(), 400);
    let summary = summarize(&TimeSeries::from_records(&records), SETTLE).unwrap();
    assert_eq!(summary.residue_sum, pi.state().integral);
}
