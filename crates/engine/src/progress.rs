//! Continuous progress callback kinds

use serde::{Deserialize, Serialize};

/// The phase a progress report belongs to.
///
/// The first five iterate over per-package targets; the rest are one-shot
/// gate phases reported with an empty target name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ProgressKind {
    AddStart,
    UpgradeStart,
    DowngradeStart,
    ReinstallStart,
    RemoveStart,
    ConflictsStart,
    DiskspaceStart,
    IntegrityStart,
    LoadStart,
    KeyringStart,
}

impl ProgressKind {
    /// Whether this kind reports actual package-level work
    #[must_use]
    pub fn is_package_operation(self) -> bool {
        matches!(
            self,
            Self::AddStart
                | Self::UpgradeStart
                | Self::DowngradeStart
                | Self::ReinstallStart
                | Self::RemoveStart
        )
    }

    /// Whether this kind is a one-shot gate phase
    #[must_use]
    pub fn is_checkpoint(self) -> bool {
        matches!(
            self,
            Self::ConflictsStart
                | Self::DiskspaceStart
                | Self::IntegrityStart
                | Self::LoadStart
                | Self::KeyringStart
        )
    }
}
