//! Transaction session error types

use crate::engine::EngineErrorKind;
use thiserror::Error;

/// Failures of one transaction session, keyed by the lifecycle step that
/// produced them. `message` is already human-readable: for prepare and
/// commit failures it carries the diagnostics prefix built from the engine's
/// failure payload.
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("failed to begin transaction: {message}")]
    Begin {
        kind: EngineErrorKind,
        message: String,
    },

    #[error("{message}")]
    Prepare {
        kind: EngineErrorKind,
        message: String,
    },

    #[error("{message}")]
    Commit {
        kind: EngineErrorKind,
        message: String,
    },

    #[error("failed to release transaction: {message}")]
    Release {
        kind: EngineErrorKind,
        message: String,
    },
}

impl SessionError {
    /// The engine error kind behind this failure
    #[must_use]
    pub fn kind(&self) -> EngineErrorKind {
        match self {
            Self::Begin { kind, .. }
            | Self::Prepare { kind, .. }
            | Self::Commit { kind, .. }
            | Self::Release { kind, .. } => *kind,
        }
    }
}
