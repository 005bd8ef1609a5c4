//! Download callback payloads

use serde::{Deserialize, Serialize};

/// Expected byte total for the whole transaction's downloads.
///
/// Replaces the engine's sign-encoded integer convention (positive = known
/// total, negative = count of indeterminate parts, zero = unknown) with an
/// explicit tagged union.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DownloadTotal {
    /// Grand byte total across all downloads is known
    Known { bytes: u64 },
    /// N downloads of unknown size (e.g. repository databases)
    IndeterminateParts { count: u32 },
    #[default]
    Unknown,
}

/// Download activity for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum DownloadEvent {
    /// The engine started fetching the file
    Init,
    /// Bytes retrieved so far for this file; `total` may be 0 when the
    /// server did not report a length
    Progress { downloaded: u64, total: u64 },
    /// The file finished downloading
    Completed { total: u64 },
}
