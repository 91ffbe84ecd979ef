//! Result data types.

use fc_core::{Real, TimeStep};
use fc_sim::{LoopMode, SimulationRecord};
use serde::{Deserialize, Serialize};

use crate::{ResultsError, ResultsResult};

/// Names of the parallel series in a [`TimeSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    TimeStep,
    SetPoint,
    Residue,
    ControlSignal,
    Output,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 5] = [
        SeriesKind::TimeStep,
        SeriesKind::SetPoint,
        SeriesKind::Residue,
        SeriesKind::ControlSignal,
        SeriesKind::Output,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeriesKind::TimeStep => "time_step",
            SeriesKind::SetPoint => "set_point",
            SeriesKind::Residue => "residue",
            SeriesKind::ControlSignal => "control_signal",
            SeriesKind::Output => "output",
        }
    }

    pub fn parse(name: &str) -> ResultsResult<Self> {
        match name {
            "time_step" | "t" => Ok(SeriesKind::TimeStep),
            "set_point" | "setpoint" | "r" => Ok(SeriesKind::SetPoint),
            "residue" | "error" | "e" => Ok(SeriesKind::Residue),
            "control_signal" | "u" => Ok(SeriesKind::ControlSignal),
            "output" | "y" => Ok(SeriesKind::Output),
            other => Err(ResultsError::UnknownSeries(other.to_string())),
        }
    }
}

/// One run as equal-length parallel columns, indexable by tick.
///
/// This is the hand-off format for plotting and reporting collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub time_step: Vec<TimeStep>,
    pub set_point: Vec<Real>,
    pub residue: Vec<Real>,
    pub control_signal: Vec<Real>,
    pub output: Vec<u64>,
}

impl TimeSeries {
    pub fn from_records(records: &[SimulationRecord]) -> Self {
        let mut series = Self::with_capacity(records.len());
        for rec in records {
            series.push(rec);
        }
        series
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            time_step: Vec::with_capacity(n),
            set_point: Vec::with_capacity(n),
            residue: Vec::with_capacity(n),
            control_signal: Vec::with_capacity(n),
            output: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, rec: &SimulationRecord) {
        self.time_step.push(rec.time_step);
        self.set_point.push(rec.set_point);
        self.residue.push(rec.residue);
        self.control_signal.push(rec.control_signal);
        self.output.push(rec.output);
    }

    /// Check that every column has the same length.
    pub fn validate(&self) -> ResultsResult<()> {
        let expected = self.time_step.len();
        let lens = [
            ("set_point", self.set_point.len()),
            ("residue", self.residue.len()),
            ("control_signal", self.control_signal.len()),
            ("output", self.output.len()),
        ];
        for (column, len) in lens {
            if len != expected {
                return Err(ResultsError::LengthMismatch {
                    column,
                    len,
                    expected,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.time_step.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_step.is_empty()
    }

    /// Row `i` as a record, if in range.
    pub fn record(&self, i: usize) -> Option<SimulationRecord> {
        Some(SimulationRecord {
            time_step: *self.time_step.get(i)?,
            set_point: *self.set_point.get(i)?,
            residue: *self.residue.get(i)?,
            control_signal: *self.control_signal.get(i)?,
            output: *self.output.get(i)?,
        })
    }

    /// All rows in tick order.
    pub fn records(&self) -> impl Iterator<Item = SimulationRecord> + '_ {
        (0..self.len()).filter_map(|i| self.record(i))
    }

    /// One column widened to `f64`.
    pub fn column(&self, kind: SeriesKind) -> Vec<Real> {
        match kind {
            SeriesKind::TimeStep => self.time_step.iter().map(|&t| t as Real).collect(),
            SeriesKind::SetPoint => self.set_point.clone(),
            SeriesKind::Residue => self.residue.clone(),
            SeriesKind::ControlSignal => self.control_signal.clone(),
            SeriesKind::Output => self.output.iter().map(|&y| y as Real).collect(),
        }
    }
}

impl From<&[SimulationRecord]> for TimeSeries {
    fn from(records: &[SimulationRecord]) -> Self {
        Self::from_records(records)
    }
}

/// A finished run: its mode plus the recorded series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub name: String,
    pub mode: LoopMode,
    pub series: TimeSeries,
}

impl RunResult {
    pub fn new(name: impl Into<String>, mode: LoopMode, records: &[SimulationRecord]) -> Self {
        Self {
            name: name.into(),
            mode,
            series: TimeSeries::from_records(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(t: TimeStep, r: Real, e: Real, u: Real, y: u64) -> SimulationRecord {
        SimulationRecord {
            time_step: t,
            set_point: r,
            residue: e,
            control_signal: u,
            output: y,
        }
    }

    #[test]
    fn columns_follow_records() {
        let records = vec![rec(0, 5.0, 0.0, 5.0, 3), rec(1, 5.0, 0.0, 5.0, 4)];
        let series = TimeSeries::from_records(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series.time_step, vec![0, 1]);
        assert_eq!(series.output, vec![3, 4]);
        assert_eq!(series.column(SeriesKind::Output), vec![3.0, 4.0]);
        assert_eq!(series.record(1), Some(records[1]));
        assert_eq!(series.record(2), None);
        assert_eq!(series.records().collect::<Vec<_>>(), records);
        series.validate().unwrap();
    }

    #[test]
    fn validate_catches_ragged_columns() {
        let mut series = TimeSeries::from_records(&[rec(0, 1.0, 1.0, 1.0, 0)]);
        series.residue.push(2.0);
        let err = series.validate().unwrap_err();
        assert!(matches!(
            err,
            ResultsError::LengthMismatch {
                column: "residue",
                len: 2,
                expected: 1
            }
        ));
    }

    #[test]
    fn series_names_roundtrip() {
        for kind in SeriesKind::ALL {
            assert_eq!(SeriesKind::parse(kind.name()).unwrap(), kind);
        }
        assert_eq!(SeriesKind::parse("y").unwrap(), SeriesKind::Output);
        assert!(SeriesKind::parse("pressure").is_err());
    }

    #[test]
    fn empty_series() {
        let series = TimeSeries::from_records(&[]);
        assert!(series.is_empty());
        series.validate().unwrap();
    }
}
