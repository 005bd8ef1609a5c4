//! Interactive questions raised by the engine

use pkgd_types::{Dependency, Package};
use serde::{Deserialize, Serialize};

/// A decision the engine needs before it can continue.
///
/// The engine blocks inside the question callback until an answer is
/// returned; there is no way to defer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Question {
    /// Install a package the configuration marks as ignored?
    InstallIgnored { package: Package },
    /// Replace `old` with `new` from repository `repository`?
    Replace {
        old: Package,
        new: Package,
        repository: String,
    },
    /// Remove `conflicting` because it conflicts with `package`?
    Conflict {
        package: String,
        conflicting: String,
    },
    /// Delete a corrupted package archive?
    Corrupted { filename: String, reason: String },
    /// Skip packages that depend on packages being removed?
    RemoveDependents { packages: Vec<Package> },
    /// Import a missing signing key?
    ImportKey { fingerprint: String, uid: String },
    /// Which provider should satisfy `dependency`?
    SelectProvider {
        providers: Vec<Package>,
        dependency: Dependency,
    },
}

/// The decision produced for one question.
///
/// Returned to the engine instead of mutated in place; `Default` leaves the
/// engine's own default in effect (used for question kinds this layer does
/// not understand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionAnswer {
    Install { install: bool },
    Replace { replace: bool },
    Remove { remove: bool },
    Skip { skip: bool },
    Import { import: bool },
    UseIndex { index: usize },
    Default,
}
