//! Engine lifecycle events
//!
//! A closed rendition of the engine's event stream. Variants this layer
//! deliberately ignores are still listed so the dispatch can tell "known and
//! irrelevant" apart from "new engine event kind we have never seen".

use pkgd_types::{Dependency, Package};
use serde::{Deserialize, Serialize};

/// One package-level operation within the transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PackageOperation {
    Install { new: Package },
    Remove { old: Package },
    Upgrade { new: Package, old: Package },
    Downgrade { new: Package, old: Package },
    Reinstall { new: Package, old: Package },
}

/// Discrete lifecycle events raised by the engine during prepare and commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum TransactionEvent {
    CheckDepsStart,
    CheckDepsDone,
    ResolveDepsStart,
    ResolveDepsDone,
    InterConflictsStart,
    InterConflictsDone,
    FileConflictsStart,
    FileConflictsDone,
    DiskspaceStart,
    DiskspaceDone,
    IntegrityStart,
    IntegrityDone,
    KeyringStart,
    KeyringDone,
    KeyDownloadStart,
    KeyDownloadDone,
    LoadStart,
    LoadDone,
    PackageOperationStart(PackageOperation),
    PackageOperationDone(PackageOperation),
    /// One line of scriptlet output from the package currently processed
    ScriptletInfo { line: String },
    /// A package is no longer optionally required by anything
    OptDepRemoval {
        package: Package,
        dependency: Dependency,
    },
    TransactionStart,
    TransactionDone,
    HookStart,
    HookDone,
    HookRunStart,
    HookRunDone {
        name: String,
        description: String,
        position: usize,
        total: usize,
    },
    DbRetrieveStart,
    DbRetrieveDone,
    DbRetrieveFailed,
    PkgRetrieveStart,
    PkgRetrieveDone,
    PkgRetrieveFailed,
    DatabaseMissing { name: String },
    PacnewCreated { file: String },
    PacsaveCreated { file: String },
}
