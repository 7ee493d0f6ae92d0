//! Data types produced by the aggregation pipeline.

use serde::Serialize;
use std::fmt;

use crate::error::{DashboardError, Result};

/// Which categorical column a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Season,
    Weather,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Season => f.write_str("season"),
            CategoryKind::Weather => f.write_str("weather"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Maps the dataset's 1-4 season code to a [`Season`].
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Season::Winter),
            2 => Ok(Season::Spring),
            3 => Ok(Season::Summer),
            4 => Ok(Season::Fall),
            _ => Err(DashboardError::UnknownCategory {
                kind: CategoryKind::Season,
                code,
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Weather {
    #[serde(rename = "Clear/Partly Cloudy")]
    Clear,
    #[serde(rename = "Mist/Cloudy")]
    Mist,
    #[serde(rename = "Light Snow/Rain")]
    LightPrecipitation,
    #[serde(rename = "Heavy Rain/Ice")]
    HeavyPrecipitation,
}

impl Weather {
    /// Maps the dataset's 1-4 `weathersit` code to a [`Weather`].
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            1 => Ok(Weather::Clear),
            2 => Ok(Weather::Mist),
            3 => Ok(Weather::LightPrecipitation),
            4 => Ok(Weather::HeavyPrecipitation),
            _ => Err(DashboardError::UnknownCategory {
                kind: CategoryKind::Weather,
                code,
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weather::Clear => "Clear/Partly Cloudy",
            Weather::Mist => "Mist/Cloudy",
            Weather::LightPrecipitation => "Light Snow/Rain",
            Weather::HeavyPrecipitation => "Heavy Rain/Ice",
        }
    }
}

/// Mean rental count for one observed (season, weather) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonWeatherCell {
    pub season: Season,
    pub weathersit: Weather,
    pub mean_cnt: f64,
    /// Number of daily records averaged into `mean_cnt`.
    pub records: usize,
}

/// Weekday/weekend classification of an hourly record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// Weekday codes 0 (Sunday) and 6 (Saturday) are weekend days.
    pub fn from_weekday(code: u8) -> Self {
        if matches!(code, 0 | 6) {
            DayType::Weekend
        } else {
            DayType::Weekday
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayType::Weekday => f.write_str("Weekday"),
            DayType::Weekend => f.write_str("Weekend"),
        }
    }
}

/// One row of the wide hourly profile. Missing cells are `None`, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyRow {
    pub hour: u8,
    #[serde(rename = "Weekday")]
    pub weekday: Option<f64>,
    #[serde(rename = "Weekend")]
    pub weekend: Option<f64>,
}

impl HourlyRow {
    pub fn get(&self, day_type: DayType) -> Option<f64> {
        match day_type {
            DayType::Weekday => self.weekday,
            DayType::Weekend => self.weekend,
        }
    }
}

pub const HOURS: usize = 24;

/// Wide hourly table: exactly one row per hour 0-23, in hour order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HourlyProfile {
    pub(crate) rows: [HourlyRow; HOURS],
}

impl HourlyProfile {
    pub fn rows(&self) -> &[HourlyRow] {
        &self.rows
    }

    pub fn hour(&self, hour: u8) -> Option<&HourlyRow> {
        self.rows.get(hour as usize)
    }
}

/// Hourly profile plus the peak hour of each day type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyAnalysis {
    pub profile: HourlyProfile,
    pub peak_weekday_hour: u8,
    pub peak_weekend_hour: u8,
}
