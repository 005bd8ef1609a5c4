//! Prepare/commit failure payloads
//!
//! On failure the engine hands back a list describing the offending
//! packages. The payload is owned: diagnostics consume it by value, so every
//! node is dropped no matter which formatting branch runs.

use pkgd_errors::EngineErrorKind;
use pkgd_types::Dependency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An unsatisfiable dependency: `target` requires `depend`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepMissing {
    pub target: String,
    pub depend: Dependency,
    /// Package whose upgrade/removal broke the dependency, when known
    pub causing_package: Option<String>,
}

/// Two transaction targets that conflict with each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub first: String,
    pub second: String,
    /// The dependency that expresses the conflict; usually one of the two
    /// package's own names
    pub reason: Dependency,
}

/// A file owned by more than one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileConflict {
    /// `target` and `conflicting` both own `file`
    Targets {
        target: String,
        conflicting: String,
        file: String,
    },
    /// `target` owns `file` which already exists on the filesystem
    Filesystem { target: String, file: String },
}

/// Failure detail lists, keyed by the error kind that produced them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailurePayload {
    /// Names of packages built for an invalid architecture
    InvalidArch { packages: Vec<String> },
    MissingDeps { misses: Vec<DepMissing> },
    Conflicts { conflicts: Vec<Conflict> },
    FileConflicts { conflicts: Vec<FileConflict> },
    /// Names of package archives that failed validation during commit
    InvalidPackages { packages: Vec<String> },
    #[default]
    None,
}

/// One terminal prepare/commit/release failure from the engine
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EngineFailure {
    pub kind: EngineErrorKind,
    /// The engine's own error text for `kind`
    pub message: String,
    pub payload: FailurePayload,
}

impl EngineFailure {
    /// Create a failure without payload
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            payload: FailurePayload::None,
        }
    }

    /// Attach a failure payload
    #[must_use]
    pub fn with_payload(mut self, payload: FailurePayload) -> Self {
        self.payload = payload;
        self
    }
}
