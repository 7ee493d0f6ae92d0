//! Aggregations over the filtered datasets.
//!
//! `seasonal` groups daily records by season and weather, `hourly` pivots
//! hourly records into a weekday/weekend profile and finds the peak hours.

pub mod hourly;
pub mod seasonal;
pub mod types;
pub mod utility;
