//! Entry point of the analysis pipeline.
//!
//! A [`Dashboard`] holds both datasets read-only and answers each view
//! request with a fresh filter and aggregation pass.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::analyzers::hourly::analyze_hourly;
use crate::analyzers::seasonal::aggregate_season_weather;
use crate::analyzers::types::{HourlyAnalysis, SeasonWeatherCell};
use crate::config::DataPaths;
use crate::error::{DashboardError, Result};
use crate::filter::{DateRange, filter_by_range};
use crate::loader::{load_daily, load_hourly};
use crate::records::{DailyRecord, HourlyRecord};

/// The two source datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl Datasets {
    pub fn load(paths: &DataPaths) -> Result<Self> {
        Ok(Self {
            daily: load_daily(&paths.day)?,
            hourly: load_hourly(&paths.hour)?,
        })
    }
}

pub struct Dashboard {
    data: Arc<Datasets>,
}

impl Dashboard {
    pub fn new(data: Arc<Datasets>) -> Self {
        Self { data }
    }

    /// Loads both datasets from disk without caching.
    pub fn open(paths: &DataPaths) -> Result<Self> {
        Ok(Self::new(Arc::new(Datasets::load(paths)?)))
    }

    pub fn datasets(&self) -> &Datasets {
        &self.data
    }

    /// Earliest to latest valid date of the daily dataset.
    pub fn full_range(&self) -> Option<DateRange> {
        DateRange::span(&self.data.daily)
    }

    /// Fills missing bounds from [`Dashboard::full_range`].
    ///
    /// An inverted result is an `InvalidRange` error.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<DateRange> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                let full = self.full_range().ok_or(DashboardError::NoValidDates)?;
                (start.unwrap_or(full.start), end.unwrap_or(full.end))
            }
        };
        DateRange::new(start, end)
    }

    /// Mean daily rentals per (season, weather) within `range`.
    #[tracing::instrument(skip(self), fields(start = %range.start, end = %range.end))]
    pub fn season_weather(&self, range: &DateRange) -> Result<Vec<SeasonWeatherCell>> {
        let filtered = filter_by_range(&self.data.daily, range);
        info!(rows = filtered.len(), "Daily records in range");
        aggregate_season_weather(&filtered)
    }

    /// Weekday/weekend hourly profile and peak hours within `range`.
    #[tracing::instrument(skip(self), fields(start = %range.start, end = %range.end))]
    pub fn hourly_usage(&self, range: &DateRange) -> Result<HourlyAnalysis> {
        let filtered = filter_by_range(&self.data.hourly, range);
        info!(rows = filtered.len(), "Hourly records in range");
        analyze_hourly(&filtered)
    }
}
