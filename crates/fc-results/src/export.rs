//! Text renderings of a time series.

use std::fmt::Write as _;

use crate::ResultsResult;
use crate::types::{SeriesKind, TimeSeries};

/// CSV with one header row and one row per tick.
pub fn to_csv(series: &TimeSeries) -> String {
    let header: Vec<&str> = SeriesKind::ALL.iter().map(|k| k.name()).collect();
    let mut csv = header.join(",");
    csv.push('\n');
    for rec in series.records() {
        let _ = writeln!(
            csv,
            "{},{},{},{},{}",
            rec.time_step, rec.set_point, rec.residue, rec.control_signal, rec.output
        );
    }
    csv
}

/// Pretty-printed JSON object of parallel arrays.
pub fn to_json(series: &TimeSeries) -> ResultsResult<String> {
    Ok(serde_json::to_string_pretty(series)?)
}

/// Whitespace-separated `t r e u y` rows, one per tick.
pub fn to_table(series: &TimeSeries) -> String {
    let mut out = String::new();
    for rec in series.records() {
        let _ = writeln!(
            out,
            "{} {} {} {} {}",
            rec.time_step, rec.set_point, rec.residue, rec.control_signal, rec.output
        );
    }
    out
}
