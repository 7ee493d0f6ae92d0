//! Error types for the dashboard pipeline.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::analyzers::types::{CategoryKind, DayType};

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("{dataset} dataset is missing required column '{column}'")]
    Schema {
        dataset: &'static str,
        column: String,
    },
    /// Recovered by the loader: the record keeps a null date.
    #[error("could not parse date '{value}'")]
    DateParse { value: String },
    #[error("row {row}: invalid value '{value}' for column '{column}'")]
    InvalidField {
        row: u64,
        column: &'static str,
        value: String,
    },
    #[error("unknown {kind} code {code}")]
    UnknownCategory { kind: CategoryKind, code: i64 },
    #[error("no {0} records in the selected range")]
    EmptyColumn(DayType),
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("dataset has no valid dates to derive a default range from")]
    NoValidDates,
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
}
