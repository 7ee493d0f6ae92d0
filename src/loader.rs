//! CSV ingestion for the daily and hourly datasets.
//!
//! Header names are trimmed and lower-cased before lookup, so `" DteDay"`
//! and `dteday` address the same column. Unparseable dates are nulled rather
//! than rejected; every other malformed field fails the load.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::records::{DailyRecord, HourlyRecord};

const DAILY_COLUMNS: [&str; 4] = ["dteday", "season", "weathersit", "cnt"];
const HOURLY_COLUMNS: [&str; 4] = ["dteday", "hr", "weekday", "cnt"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a calendar date in one of the accepted layouts.
///
/// A trailing time of day is accepted and discarded.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let value = raw.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }

    Err(DashboardError::DateParse {
        value: value.to_string(),
    })
}

/// Lower-cases and trims every header name.
pub fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    headers.iter().map(|h| h.trim().to_lowercase()).collect()
}

/// Positions of `required` columns within `headers`, in `required` order.
fn locate_columns<const N: usize>(
    dataset: &'static str,
    headers: &[String],
    required: [&'static str; N],
) -> Result<[usize; N]> {
    let mut positions = [0usize; N];
    for (slot, column) in positions.iter_mut().zip(required) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DashboardError::Schema {
                dataset,
                column: column.to_string(),
            })?;
    }
    Ok(positions)
}

fn field<T: FromStr>(
    record: &StringRecord,
    idx: usize,
    row: u64,
    column: &'static str,
) -> Result<T> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse().map_err(|_| DashboardError::InvalidField {
        row,
        column,
        value: raw.to_string(),
    })
}

fn date_field(record: &StringRecord, idx: usize, row: u64) -> Option<NaiveDate> {
    let raw = record.get(idx).unwrap_or("");
    match parse_date(raw) {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(row, error = %e, "Nulling unparseable date");
            None
        }
    }
}

/// Row-by-row CSV walk shared by both datasets.
///
/// `build` receives the raw record, the 1-based data row number and the
/// resolved column positions.
fn read_rows<R, T, F, const N: usize>(
    reader: R,
    origin: &str,
    dataset: &'static str,
    required: [&'static str; N],
    mut build: F,
) -> Result<Vec<T>>
where
    R: Read,
    F: FnMut(&StringRecord, u64, &[usize; N]) -> Result<T>,
{
    let csv_err = |source: csv::Error| DashboardError::Csv {
        origin: origin.to_string(),
        source,
    };

    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = normalize_headers(rdr.headers().map_err(csv_err)?);
    let columns = locate_columns(dataset, &headers, required)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_err)?;
        rows.push(build(&record, i as u64 + 1, &columns)?);
    }

    Ok(rows)
}

fn warn_on_null_dates<'a>(origin: &str, dates: impl Iterator<Item = &'a Option<NaiveDate>>) {
    let nulled = dates.filter(|d| d.is_none()).count();
    if nulled > 0 {
        warn!(origin, nulled, "Rows with unparseable dates are excluded from analysis");
    }
}

/// Reads daily records from any CSV source. `origin` names it in errors.
pub fn read_daily<R: Read>(reader: R, origin: &str) -> Result<Vec<DailyRecord>> {
    let rows = read_rows(reader, origin, "daily", DAILY_COLUMNS, |rec, row, cols| {
        Ok(DailyRecord {
            date: date_field(rec, cols[0], row),
            season: field(rec, cols[1], row, "season")?,
            weathersit: field(rec, cols[2], row, "weathersit")?,
            cnt: field(rec, cols[3], row, "cnt")?,
        })
    })?;

    warn_on_null_dates(origin, rows.iter().map(|r| &r.date));

    let mut seen = HashSet::new();
    let duplicates = rows
        .iter()
        .filter_map(|r| r.date)
        .filter(|d| !seen.insert(*d))
        .count();
    if duplicates > 0 {
        warn!(origin, duplicates, "Daily dataset repeats dates");
    }

    Ok(rows)
}

/// Reads hourly records from any CSV source. `origin` names it in errors.
///
/// `hr` must lie in 0-23 and `weekday` in 0-6.
pub fn read_hourly<R: Read>(reader: R, origin: &str) -> Result<Vec<HourlyRecord>> {
    let rows = read_rows(reader, origin, "hourly", HOURLY_COLUMNS, |rec, row, cols| {
        let hr: u8 = field(rec, cols[1], row, "hr")?;
        if hr > 23 {
            return Err(DashboardError::InvalidField {
                row,
                column: "hr",
                value: hr.to_string(),
            });
        }
        let weekday: u8 = field(rec, cols[2], row, "weekday")?;
        if weekday > 6 {
            return Err(DashboardError::InvalidField {
                row,
                column: "weekday",
                value: weekday.to_string(),
            });
        }

        Ok(HourlyRecord {
            date: date_field(rec, cols[0], row),
            hr,
            weekday,
            cnt: field(rec, cols[3], row, "cnt")?,
        })
    })?;

    warn_on_null_dates(origin, rows.iter().map(|r| &r.date));
    Ok(rows)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the daily dataset from a CSV file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_daily(path: impl AsRef<Path>) -> Result<Vec<DailyRecord>> {
    let path = path.as_ref();
    let records = read_daily(open(path)?, &path.display().to_string())?;
    info!(rows = records.len(), "Daily dataset loaded");
    Ok(records)
}

/// Loads the hourly dataset from a CSV file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_hourly(path: impl AsRef<Path>) -> Result<Vec<HourlyRecord>> {
    let path = path.as_ref();
    let records = read_hourly(open(path)?, &path.display().to_string())?;
    info!(rows = records.len(), "Hourly dataset loaded");
    Ok(records)
}
