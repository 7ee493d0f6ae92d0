//! Typed rows of the two source datasets.

use chrono::NaiveDate;
use serde::Serialize;

/// One row of the daily dataset.
///
/// `date` is `None` when the raw value could not be parsed; such rows never
/// match a date range and so drop out of every aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: Option<NaiveDate>,
    /// Raw season code; 1-4 are the known seasons.
    pub season: i64,
    /// Raw weather code; 1-4 are the known conditions.
    pub weathersit: i64,
    pub cnt: u32,
}

/// One row of the hourly dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub date: Option<NaiveDate>,
    /// Hour of day, 0-23.
    pub hr: u8,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
    pub cnt: u32,
}
