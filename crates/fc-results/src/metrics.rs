//! Residue and output metrics over a finished run.
//!
//! The plant is stochastic, so convergence is judged on averages: a rolling
//! mean absolute residue, and per setpoint segment the mean absolute residue
//! right after the switch compared with the rest of the segment.

use fc_core::Real;
use serde::{Deserialize, Serialize};

use crate::types::TimeSeries;
use crate::{ResultsError, ResultsResult};

/// Mean absolute value of each full window, in order.
///
/// Returns `len - window + 1` values, or none when the input is shorter than
/// the window.
pub fn rolling_mae(residues: &[Real], window: usize) -> ResultsResult<Vec<Real>> {
    if window == 0 {
        return Err(ResultsError::InvalidArg {
            what: "window must be positive",
        });
    }
    if residues.len() < window {
        return Ok(Vec::new());
    }

    let n = window as Real;
    let mut sum: Real = residues[..window].iter().map(|e| e.abs()).sum();
    let mut out = Vec::with_capacity(residues.len() - window + 1);
    out.push(sum / n);
    for i in window..residues.len() {
        sum += residues[i].abs() - residues[i - window].abs();
        out.push(sum / n);
    }
    Ok(out)
}

/// A maximal run of ticks sharing one setpoint value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub set_point: Real,
    /// First row index.
    pub start: usize,
    /// One past the last row index.
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Split a run wherever the setpoint changes.
pub fn segments(series: &TimeSeries) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    for (i, &sp) in series.set_point.iter().enumerate() {
        match out.last_mut() {
            Some(seg) if seg.set_point == sp => seg.end = i + 1,
            _ => out.push(Segment {
                set_point: sp,
                start: i,
                end: i + 1,
            }),
        }
    }
    out
}

/// Early versus late residue within one setpoint segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentConvergence {
    pub segment: Segment,
    /// Mean |residue| over the first `settle` ticks of the segment.
    pub early_mae: Real,
    /// Mean |residue| over the remaining ticks, if any remain.
    pub late_mae: Option<Real>,
}

impl SegmentConvergence {
    /// True when the residue shrank (or held) after the settle window.
    pub fn is_converging(&self) -> bool {
        self.late_mae.is_none_or(|late| late <= self.early_mae)
    }
}

/// Per-segment convergence with a settle window of `settle` ticks.
pub fn segment_convergence(
    series: &TimeSeries,
    settle: usize,
) -> ResultsResult<Vec<SegmentConvergence>> {
    if settle == 0 {
        return Err(ResultsError::InvalidArg {
            what: "settle window must be positive",
        });
    }
    series.validate()?;

    Ok(segments(series)
        .into_iter()
        .map(|segment| {
            let residues = &series.residue[segment.start..segment.end];
            let split = settle.min(residues.len());
            let (early, late) = residues.split_at(split);
            SegmentConvergence {
                segment,
                early_mae: mean_abs(early).unwrap_or(0.0),
                late_mae: mean_abs(late),
            }
        })
        .collect())
}

/// Headline numbers for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: usize,
    pub output_min: Option<u64>,
    pub output_max: Option<u64>,
    pub output_mean: Option<Real>,
    pub final_output: Option<u64>,
    pub mean_abs_residue: Option<Real>,
    /// Sum of all residues; equals a PI controller's final integral.
    pub residue_sum: Real,
    pub segments: Vec<SegmentConvergence>,
}

/// Summarize a run, judging convergence with a `settle`-tick window.
pub fn summarize(series: &TimeSeries, settle: usize) -> ResultsResult<RunSummary> {
    let segments = segment_convergence(series, settle)?;
    let outputs = &series.output;
    let output_mean = if outputs.is_empty() {
        None
    } else {
        Some(outputs.iter().map(|&y| y as Real).sum::<Real>() / outputs.len() as Real)
    };

    Ok(RunSummary {
        ticks: series.len(),
        output_min: outputs.iter().copied().min(),
        output_max: outputs.iter().copied().max(),
        output_mean,
        final_output: outputs.last().copied(),
        mean_abs_residue: mean_abs(&series.residue),
        residue_sum: series.residue.iter().sum(),
        segments,
    })
}

fn mean_abs(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().map(|v| v.abs()).sum::<Real>() / values.len() as Real)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_sim::SimulationRecord;

    fn series(points: &[(Real, Real, u64)]) -> TimeSeries {
        let records: Vec<SimulationRecord> = points
            .iter()
            .enumerate()
            .map(|(t, &(r, e, y))| SimulationRecord {
                time_step: t as u64,
                set_point: r,
                residue: e,
                control_signal: 0.0,
                output: y,
            })
            .collect();
        TimeSeries::from_records(&records)
    }

    #[test]
    fn rolling_mae_basic() {
        let mae = rolling_mae(&[4.0, -2.0, 0.0, -2.0], 2).unwrap();
        assert_eq!(mae, vec![3.0, 1.0, 1.0]);
    }

    #[test]
    fn rolling_mae_edge_cases() {
        assert!(rolling_mae(&[1.0], 0).is_err());
        assert!(rolling_mae(&[1.0, 2.0], 3).unwrap().is_empty());
        assert_eq!(rolling_mae(&[-1.0, 3.0], 2).unwrap(), vec![2.0]);
    }

    #[test]
    fn segments_split_on_setpoint_change() {
        let s = series(&[(0.0, 0.0, 0), (0.0, 0.0, 0), (50.0, 50.0, 0), (10.0, -5.0, 15)]);
        let segs = segments(&s);
        assert_eq!(segs.len(), 3);
        assert_eq!((segs[0].start, segs[0].end), (0, 2));
        assert_eq!(segs[1].set_point, 50.0);
        assert_eq!(segs[2].len(), 1);
    }

    #[test]
    fn convergence_compares_early_and_late() {
        let s = series(&[
            (10.0, 10.0, 0),
            (10.0, 6.0, 4),
            (10.0, 2.0, 8),
            (10.0, -1.0, 11),
        ]);
        let conv = segment_convergence(&s, 2).unwrap();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv[0].early_mae, 8.0);
        assert_eq!(conv[0].late_mae, Some(1.5));
        assert!(conv[0].is_converging());
    }

    #[test]
    fn short_segment_has_no_late_window() {
        let s = series(&[(1.0, 1.0, 0)]);
        let conv = segment_convergence(&s, 5).unwrap();
        assert_eq!(conv[0].late_mae, None);
        assert!(conv[0].is_converging());
    }

    #[test]
    fn summary_of_small_run() {
        let s = series(&[(5.0, 5.0, 2), (5.0, 3.0, 6), (5.0, -1.0, 4)]);
        let summary = summarize(&s, 1).unwrap();
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.output_min, Some(2));
        assert_eq!(summary.output_max, Some(6));
        assert_eq!(summary.output_mean, Some(4.0));
        assert_eq!(summary.final_output, Some(4));
        assert_eq!(summary.mean_abs_residue, Some(3.0));
        assert_eq!(summary.residue_sum, 7.0);
    }

    #[test]
    fn summary_of_empty_run() {
        let summary = summarize(&TimeSeries::default(), 10).unwrap();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.output_max, None);
        assert_eq!(summary.mean_abs_residue, None);
        assert!(summary.segments.is_empty());
    }
}
