use tracing::debug;

use crate::analyzers::types::{DayType, HOURS, HourlyAnalysis, HourlyProfile, HourlyRow};
use crate::analyzers::utility::mean;
use crate::error::{DashboardError, Result};
use crate::records::HourlyRecord;

/// Pivots hourly records into a 24-row weekday/weekend table of mean counts.
///
/// Cells with no contributing records stay `None`.
pub fn build_profile(records: &[HourlyRecord]) -> HourlyProfile {
    // [hour][0 = weekday, 1 = weekend]
    let mut series: [[Vec<f64>; 2]; HOURS] = std::array::from_fn(|_| Default::default());

    for r in records {
        let slot = match DayType::from_weekday(r.weekday) {
            DayType::Weekday => 0,
            DayType::Weekend => 1,
        };
        if let Some(cell) = series.get_mut(r.hr as usize) {
            cell[slot].push(r.cnt as f64);
        }
    }

    let cell_mean = |values: &Vec<f64>| (!values.is_empty()).then(|| mean(values));

    let rows = std::array::from_fn(|hour| HourlyRow {
        hour: hour as u8,
        weekday: cell_mean(&series[hour][0]),
        weekend: cell_mean(&series[hour][1]),
    });

    HourlyProfile { rows }
}

impl HourlyProfile {
    /// First hour, scanning 0 to 23, at which `day_type`'s mean is maximal.
    ///
    /// Missing cells are skipped. Fails with `EmptyColumn` when every cell of
    /// the column is missing.
    pub fn peak_hour(&self, day_type: DayType) -> Result<u8> {
        let mut best: Option<(u8, f64)> = None;

        for row in self.rows() {
            let Some(value) = row.get(day_type) else {
                continue;
            };
            match best {
                Some((_, max)) if value <= max => {}
                _ => best = Some((row.hour, value)),
            }
        }

        best.map(|(hour, _)| hour).ok_or(DashboardError::EmptyColumn(day_type))
    }
}

/// Builds the hourly profile and extracts both peak hours.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn analyze_hourly(records: &[HourlyRecord]) -> Result<HourlyAnalysis> {
    let profile = build_profile(records);
    let peak_weekday_hour = profile.peak_hour(DayType::Weekday)?;
    let peak_weekend_hour = profile.peak_hour(DayType::Weekend)?;

    debug!(peak_weekday_hour, peak_weekend_hour, "Hourly profile built");

    Ok(HourlyAnalysis {
        profile,
        peak_weekday_hour,
        peak_weekend_hour,
    })
}
