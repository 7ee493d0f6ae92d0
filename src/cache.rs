//! Memoized dataset loading.
//!
//! The cache is owned by whoever drives the pipeline, keyed by the identity
//! of both input files, and can be dropped at any time. A hit only skips
//! re-parsing; results never depend on it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

use crate::config::DataPaths;
use crate::dashboard::Datasets;
use crate::error::{DashboardError, Result};

/// What a file looked like when it was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl FileIdentity {
    pub fn of(path: &Path) -> Result<Self> {
        let io_err = |source: std::io::Error| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        };
        let canonical = fs::canonicalize(path).map_err(io_err)?;
        let meta = fs::metadata(&canonical).map_err(io_err)?;

        Ok(Self {
            path: canonical,
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

type Key = (FileIdentity, FileIdentity);

#[derive(Default)]
pub struct DatasetCache {
    entry: Option<(Key, Arc<Datasets>)>,
    loads: usize,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached datasets if neither file changed, otherwise reloads.
    pub fn get_or_load(&mut self, paths: &DataPaths) -> Result<Arc<Datasets>> {
        let key = (FileIdentity::of(&paths.day)?, FileIdentity::of(&paths.hour)?);

        if let Some((cached_key, data)) = &self.entry {
            if *cached_key == key {
                debug!("Dataset cache hit");
                return Ok(Arc::clone(data));
            }
        }

        debug!("Dataset cache miss, loading");
        let data = Arc::new(Datasets::load(paths)?);
        self.loads += 1;
        self.entry = Some((key, Arc::clone(&data)));
        Ok(data)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of loads performed so far.
    pub fn loads(&self) -> usize {
        self.loads
    }
}
