use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::types::{Season, SeasonWeatherCell, Weather};
use crate::analyzers::utility::mean;
use crate::error::Result;
use crate::records::DailyRecord;

/// Mean daily rental count per observed (season, weather) pair.
///
/// Rows come out ordered by season code, then weather code. Pairs with no
/// records produce no row. A code outside 1-4 fails the whole aggregation
/// with `UnknownCategory`.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn aggregate_season_weather(records: &[DailyRecord]) -> Result<Vec<SeasonWeatherCell>> {
    let mut groups: BTreeMap<(i64, i64), Vec<f64>> = BTreeMap::new();

    for r in records {
        groups
            .entry((r.season, r.weathersit))
            .or_default()
            .push(r.cnt as f64);
    }

    let cells = groups
        .into_iter()
        .map(|((season, weathersit), counts)| -> Result<SeasonWeatherCell> {
            Ok(SeasonWeatherCell {
                season: Season::from_code(season)?,
                weathersit: Weather::from_code(weathersit)?,
                mean_cnt: mean(&counts),
                records: counts.len(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(groups = cells.len(), "Season/weather aggregation complete");
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::CategoryKind;
    use crate::error::DashboardError;
    use chrono::NaiveDate;

    fn rec(day: u32, season: i64, weathersit: i64, cnt: u32) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, day),
            season,
            weathersit,
            cnt,
        }
    }

    #[test]
    fn test_single_group_mean() {
        let records = vec![rec(1, 1, 1, 100), rec(2, 1, 1, 200), rec(3, 1, 1, 300)];
        let cells = aggregate_season_weather(&records).unwrap();

        assert_eq!(
            cells,
            vec![SeasonWeatherCell {
                season: Season::Winter,
                weathersit: Weather::Clear,
                mean_cnt: 200.0,
                records: 3,
            }]
        );
        assert_eq!(cells[0].season.label(), "Winter");
        assert_eq!(cells[0].weathersit.label(), "Clear/Partly Cloudy");
    }

    #[test]
    fn test_groups_sorted_and_absent_pairs_skipped() {
        let records = vec![
            rec(1, 3, 2, 10),
            rec(2, 1, 3, 20),
            rec(3, 3, 1, 30),
            rec(4, 1, 1, 40),
            rec(5, 3, 2, 50),
        ];
        let cells = aggregate_season_weather(&records).unwrap();
        let keys: Vec<(Season, Weather)> = cells.iter().map(|c| (c.season, c.weathersit)).collect();

        assert_eq!(
            keys,
            vec![
                (Season::Winter, Weather::Clear),
                (Season::Winter, Weather::LightPrecipitation),
                (Season::Summer, Weather::Clear),
                (Season::Summer, Weather::Mist),
            ]
        );
        assert_eq!(cells[3].mean_cnt, 30.0);
    }

    #[test]
    fn test_group_sizes_sum_to_input() {
        let records: Vec<DailyRecord> = (1..=28)
            .map(|d| rec(d, (d % 4 + 1) as i64, (d % 3 + 1) as i64, d * 10))
            .collect();
        let cells = aggregate_season_weather(&records).unwrap();

        let total: usize = cells.iter().map(|c| c.records).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_empty_input_yields_no_rows() {
        assert!(aggregate_season_weather(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_season_code() {
        let err = aggregate_season_weather(&[rec(1, 5, 1, 10)]).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::UnknownCategory {
                kind: CategoryKind::Season,
                code: 5
            }
        ));
    }

    #[test]
    fn test_unknown_weather_code() {
        let err = aggregate_season_weather(&[rec(1, 2, 0, 10)]).unwrap_err();
        assert_eq!(err.to_string(), "unknown weather code 0");
    }
}
