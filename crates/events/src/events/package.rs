use pkgd_types::{PackageId, PackageInfo};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-package events for the event system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PackageEvent {
    /// A package entered a lifecycle state (installing, downloading, ...)
    Notified {
        info: PackageInfo,
        package: PackageId,
    },

    /// Buffered multi-line output attributed to one package
    Message { package: PackageId, text: String },

    /// Absolute paths of files retrieved for one package
    Files {
        package: PackageId,
        paths: Vec<PathBuf>,
    },
}
