//! Transaction status, role, and notification enums

use serde::{Deserialize, Serialize};

/// User-facing status of the transaction, derived from engine lifecycle
/// events and progress checkpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Unknown,
    /// Transaction data is being loaded
    Setup,
    /// The engine commit is running
    Running,
    /// Dependency resolution is in progress
    DepResolve,
    /// Signature or keyring verification
    SigCheck,
    /// Conflict and disk-space gates before commit
    TestCommit,
    /// Package archives are being loaded from the cache
    LoadingCache,
    Download,
    Install,
    Remove,
    Update,
    /// A transaction hook is executing
    RunHook,
    Cancel,
    Finished,
}

/// The operation requested by the caller; drives question policy and a few
/// status decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    InstallPackages,
    /// Install from local package files
    InstallFiles,
    RemovePackages,
    UpdatePackages,
    /// Fetch packages without installing them
    DownloadPackages,
    RefreshCache,
    /// Prepare and report the transaction without committing it
    Simulate,
    Search,
    Repair,
}

/// Lifecycle state attached to a package notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageInfo {
    Installing,
    Removing,
    Updating,
    Downloading,
    /// The operation on this package completed
    Finished,
    /// The package will be replaced as part of an update
    Obsoleting,
}

/// Job-level failure codes surfaced on the event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    DepResolutionFailed,
    PackageConflicts,
    FileConflicts,
    InvalidPackage,
    TransactionError,
    Internal,
}
