//! Package-related type definitions

use crate::Dependency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a package
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId {
    pub name: String,
    pub version: String,
}

impl PackageId {
    /// Create a new package ID
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

/// One package as seen through the native engine.
///
/// `filename` is the on-disk download artifact name the engine uses for this
/// package, when it has one; it is how download callbacks are correlated to
/// pending operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    /// Download artifact basename, if the engine fetches this package.
    pub filename: Option<String>,
    /// Optional dependencies declared by the package.
    pub optional_deps: Vec<Dependency>,
}

impl Package {
    /// Create a package with no artifact name and no optional dependencies
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            filename: None,
            optional_deps: Vec::new(),
        }
    }

    /// Set the download artifact basename
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the optional dependency list
    #[must_use]
    pub fn with_optional_deps(mut self, deps: Vec<Dependency>) -> Self {
        self.optional_deps = deps;
        self
    }

    /// Identifier for this package
    #[must_use]
    pub fn id(&self) -> PackageId {
        PackageId::new(self.name.clone(), self.version.clone())
    }

    /// Whether `basename` names this package's download artifact
    #[must_use]
    pub fn has_basename(&self, basename: &str) -> bool {
        self.filename.as_deref() == Some(basename)
    }
}
