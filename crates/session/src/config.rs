//! Session configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one transaction session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory the engine places downloaded artifacts in. Used to resolve
    /// the basenames reported by download callbacks to absolute paths.
    pub cache_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("/var/cache/pkgd/pkg"),
        }
    }
}

impl SessionConfig {
    /// Create a configuration with the given cache directory
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub(crate) fn resolve_path(&self, basename: &str) -> PathBuf {
        self.cache_dir.join(basename)
    }
}
