//! Inclusive date-range filtering shared by both datasets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::records::{DailyRecord, HourlyRecord};

/// Anything carrying an optional calendar date.
pub trait Dated {
    fn date(&self) -> Option<NaiveDate>;
}

impl Dated for DailyRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Dated for HourlyRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Closed interval `[start, end]`.
///
/// Fields are public so an inverted range can still be built; it simply
/// matches nothing. [`DateRange::new`] rejects inversion up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Smallest range covering every valid date in `records`.
    pub fn span<T: Dated>(records: &[T]) -> Option<Self> {
        let mut dates = records.iter().filter_map(|r| r.date());
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Records whose date falls inside `range`, in their original order.
///
/// Null dates never match.
pub fn filter_by_range<T: Dated + Clone>(records: &[T], range: &DateRange) -> Vec<T> {
    records
        .iter()
        .filter(|r| r.date().is_some_and(|d| range.contains(d)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(date: Option<NaiveDate>, cnt: u32) -> DailyRecord {
        DailyRecord {
            date,
            season: 1,
            weathersit: 1,
            cnt,
        }
    }

    fn sample() -> Vec<DailyRecord> {
        vec![
            daily(Some(day(2011, 1, 3)), 30),
            daily(Some(day(2011, 1, 1)), 10),
            daily(None, 99),
            daily(Some(day(2011, 1, 2)), 20),
            daily(Some(day(2011, 1, 4)), 40),
        ]
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::new(day(2011, 1, 2), day(2011, 1, 3)).unwrap();
        let counts: Vec<u32> = filter_by_range(&sample(), &range)
            .iter()
            .map(|r| r.cnt)
            .collect();
        assert_eq!(counts, vec![30, 20]);
    }

    #[test]
    fn test_null_dates_never_match() {
        let range = DateRange::new(day(2000, 1, 1), day(2100, 1, 1)).unwrap();
        let filtered = filter_by_range(&sample(), &range);
        assert_eq!(filtered.len(), 4);
        assert!(filtered.iter().all(|r| r.date.is_some()));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let range = DateRange::new(day(2011, 1, 2), day(2011, 1, 4)).unwrap();
        let once = filter_by_range(&sample(), &range);
        let twice = filter_by_range(&once, &range);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange {
            start: day(2011, 1, 4),
            end: day(2011, 1, 1),
        };
        assert!(filter_by_range(&sample(), &range).is_empty());

        let hourly = vec![HourlyRecord {
            date: Some(day(2011, 1, 2)),
            hr: 0,
            weekday: 0,
            cnt: 1,
        }];
        assert!(filter_by_range(&hourly, &range).is_empty());
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let err = DateRange::new(day(2011, 1, 4), day(2011, 1, 1)).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
        assert!(DateRange::new(day(2011, 1, 1), day(2011, 1, 1)).is_ok());
    }

    #[test]
    fn test_span_ignores_null_dates() {
        let span = DateRange::span(&sample()).unwrap();
        assert_eq!(span.start, day(2011, 1, 1));
        assert_eq!(span.end, day(2011, 1, 4));

        assert_eq!(DateRange::span(&[daily(None, 1)]), None);
        assert_eq!(DateRange::span::<DailyRecord>(&[]), None);
    }
}
