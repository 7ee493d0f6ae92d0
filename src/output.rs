//! Output formatting for the result tables.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use clap::ValueEnum;
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use tracing::debug;

use crate::analyzers::types::{HourlyAnalysis, SeasonWeatherCell};

/// How a result table is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Aligned text table
    Pretty,
    Json,
    Csv,
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Renders a value as pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes `rows` as CSV with a header line. Missing values become empty fields.
pub fn write_csv<W, T>(writer: W, rows: impl IntoIterator<Item = T>) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Aligned text table of season/weather means.
pub fn season_weather_table(cells: &[SeasonWeatherCell]) -> String {
    let mut out = format!(
        "{:<8} {:<20} {:>12} {:>8}\n",
        "Season", "Weather", "Mean rentals", "Days"
    );
    for c in cells {
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:>12.1} {:>8}",
            c.season.label(),
            c.weathersit.label(),
            c.mean_cnt,
            c.records
        );
    }
    out
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// Aligned text table of the hourly profile followed by the peak summary.
pub fn hourly_table(analysis: &HourlyAnalysis) -> String {
    let mut out = format!("{:>4} {:>10} {:>10}\n", "Hour", "Weekday", "Weekend");
    for row in analysis.profile.rows() {
        let _ = writeln!(
            out,
            "{:>4} {:>10} {:>10}",
            row.hour,
            cell(row.weekday),
            cell(row.weekend)
        );
    }
    out.push('\n');
    out.push_str(&peak_summary(analysis));
    out
}

/// Writes the season/weather view to `out` in `format`.
pub fn render_season_weather<W: Write>(
    mut out: W,
    format: Format,
    cells: &[SeasonWeatherCell],
) -> Result<()> {
    print_pretty(&cells);
    match format {
        Format::Pretty => out.write_all(season_weather_table(cells).as_bytes())?,
        Format::Json => writeln!(out, "{}", to_json(cells)?)?,
        Format::Csv => write_csv(out, cells)?,
    }
    Ok(())
}

/// Writes the hourly view to `out` in `format`.
pub fn render_hourly<W: Write>(
    mut out: W,
    format: Format,
    analysis: &HourlyAnalysis,
) -> Result<()> {
    print_pretty(&analysis);
    match format {
        Format::Pretty => out.write_all(hourly_table(analysis).as_bytes())?,
        Format::Json => writeln!(out, "{}", to_json(analysis)?)?,
        Format::Csv => write_csv(out, analysis.profile.rows())?,
    }
    Ok(())
}

/// The two peak-hour lines shown under the hourly chart.
pub fn peak_summary(analysis: &HourlyAnalysis) -> String {
    format!(
        "Peak Hour on Weekdays: {}:00\nPeak Hour on Weekends: {}:00\n",
        analysis.peak_weekday_hour, analysis.peak_weekend_hour
    )
}
