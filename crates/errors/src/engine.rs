//! The native engine's error taxonomy
//!
//! The engine reports failures as numeric codes; the ones this layer
//! dispatches on are closed variants, everything else is carried through as
//! `Other` so new engine versions degrade gracefully.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EngineErrorKind {
    /// A target package was built for an incompatible architecture
    InvalidArch,
    /// Dependencies could not be satisfied
    UnsatisfiedDeps,
    /// Two targets conflict with each other
    ConflictingDeps,
    /// Targets own the same files
    FileConflicts,
    /// A package archive failed validation during commit
    InvalidPackage,
    /// The engine aborted the transaction (including interruption)
    TransactionAborted,
    /// Any other engine error code
    Other(u32),
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArch => write!(f, "invalid architecture"),
            Self::UnsatisfiedDeps => write!(f, "unsatisfied dependencies"),
            Self::ConflictingDeps => write!(f, "conflicting dependencies"),
            Self::FileConflicts => write!(f, "file conflicts"),
            Self::InvalidPackage => write!(f, "invalid package"),
            Self::TransactionAborted => write!(f, "transaction aborted"),
            Self::Other(code) => write!(f, "engine error {code}"),
        }
    }
}
