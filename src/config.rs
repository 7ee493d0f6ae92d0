//! Dataset location resolution.
//!
//! Explicit paths win. Otherwise `BIKE_DAY_CSV` / `BIKE_HOUR_CSV` are used,
//! and failing that `day.csv` / `hour.csv` under `BIKE_DATA_DIR`
//! (default `data/dataset`).

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data/dataset";

/// Paths of the daily and hourly CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub day: PathBuf,
    pub hour: PathBuf,
}

impl DataPaths {
    /// Both files inside `dir`, using the dataset's standard file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            day: dir.join("day.csv"),
            hour: dir.join("hour.csv"),
        }
    }

    /// Resolves paths against the process environment.
    pub fn resolve(day: Option<PathBuf>, hour: Option<PathBuf>) -> Self {
        Self::resolve_with(day, hour, |key| std::env::var(key).ok())
    }

    /// Resolves paths using `lookup` for environment variables.
    pub fn resolve_with(
        day: Option<PathBuf>,
        hour: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let dir = lookup("BIKE_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let defaults = Self::in_dir(dir);

        Self {
            day: day
                .or_else(|| lookup("BIKE_DAY_CSV").map(PathBuf::from))
                .unwrap_or(defaults.day),
            hour: hour
                .or_else(|| lookup("BIKE_HOUR_CSV").map(PathBuf::from))
                .unwrap_or(defaults.hour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> Box<dyn Fn(&str) -> Option<String>> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Box::new(move |key: &str| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let paths = DataPaths::resolve_with(None, None, env(&[]));
        assert_eq!(paths, DataPaths::in_dir("data/dataset"));
    }

    #[test]
    fn test_data_dir_override() {
        let paths = DataPaths::resolve_with(None, None, env(&[("BIKE_DATA_DIR", "/srv/bikes")]));
        assert_eq!(paths.day, PathBuf::from("/srv/bikes/day.csv"));
        assert_eq!(paths.hour, PathBuf::from("/srv/bikes/hour.csv"));
    }

    #[test]
    fn test_flags_beat_env() {
        let lookup = env(&[("BIKE_DAY_CSV", "/env/day.csv"), ("BIKE_HOUR_CSV", "/env/hour.csv")]);
        let paths = DataPaths::resolve_with(Some(PathBuf::from("flag_day.csv")), None, lookup);
        assert_eq!(paths.day, PathBuf::from("flag_day.csv"));
        assert_eq!(paths.hour, PathBuf::from("/env/hour.csv"));
    }
}
