//! CLI entry point for the bike rentals dashboard.
//!
//! Provides subcommands for showing the available date span, the
//! season/weather view, and the hourly weekday-vs-weekend view.

use anyhow::{Context, Result};
use bike_rentals::{
    cache::DatasetCache,
    config::DataPaths,
    dashboard::Dashboard,
    output::{Format, render_hourly, render_season_weather},
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_rentals")]
#[command(about = "Explore the bike rental dataset by season, weather and hour", long_about = None)]
struct Cli {
    /// Daily dataset CSV (defaults to $BIKE_DAY_CSV or $BIKE_DATA_DIR/day.csv)
    #[arg(long, global = true, value_name = "FILE")]
    day: Option<PathBuf>,

    /// Hourly dataset CSV (defaults to $BIKE_HOUR_CSV or $BIKE_DATA_DIR/hour.csv)
    #[arg(long, global = true, value_name = "FILE")]
    hour: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the range of dates available in the daily dataset
    Span,
    /// Average rentals by season and weather condition
    Seasonal(ViewArgs),
    /// Average rentals per hour on weekdays vs weekends, with peak hours
    Hourly(ViewArgs),
}

#[derive(Args)]
struct ViewArgs {
    /// First date to include (YYYY-MM-DD); defaults to the earliest date
    #[arg(short, long)]
    start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD); defaults to the latest date
    #[arg(short, long)]
    end: Option<NaiveDate>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// File to write instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bike_rentals.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_rentals.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let paths = DataPaths::resolve(cli.day, cli.hour);

    let mut cache = DatasetCache::new();
    let data = cache
        .get_or_load(&paths)
        .with_context(|| format!("loading {} and {}", paths.day.display(), paths.hour.display()))?;
    let dashboard = Dashboard::new(data);

    match cli.command {
        Commands::Span => match dashboard.full_range() {
            Some(range) => {
                info!(start = %range.start, end = %range.end, "Available date span");
                println!("{} .. {}", range.start, range.end);
            }
            None => anyhow::bail!("daily dataset contains no valid dates"),
        },
        Commands::Seasonal(args) => {
            let range = dashboard.resolve_range(args.start, args.end)?;
            let cells = dashboard.season_weather(&range)?;
            info!(groups = cells.len(), "Season and weather analysis ready");

            let out = open_output(args.output.as_deref())?;
            render_season_weather(out, args.format, &cells)?;
        }
        Commands::Hourly(args) => {
            let range = dashboard.resolve_range(args.start, args.end)?;
            let analysis = dashboard.hourly_usage(&range)?;
            info!(
                peak_weekday_hour = analysis.peak_weekday_hour,
                peak_weekend_hour = analysis.peak_weekend_hour,
                "Hourly usage analysis ready"
            );

            let out = open_output(args.output.as_deref())?;
            render_hourly(out, args.format, &analysis)?;
        }
    }

    Ok(())
}

/// Opens `path` for writing, or stdout when no path is given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            info!(path = %path.display(), "Writing output to file");
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}
