//! fc-results: column-oriented time series, residue metrics and renderings.
//!
//! Nothing here touches the filesystem. Renderings return strings; callers
//! decide where they go.

pub mod export;
pub mod metrics;
pub mod types;

pub use export::{to_csv, to_json, to_table};
pub use metrics::{
    RunSummary, Segment, SegmentConvergence, rolling_mae, segment_convergence, segments,
    summarize,
};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column length mismatch: {column} has {len} entries, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        len: usize,
        expected: usize,
    },

    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
