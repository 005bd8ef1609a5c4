//! Dependency specifications as reported by the native engine
//!
//! Field order matters: `Ord` is derived so that dependencies sort by name,
//! then modifier, then version, then description. The optional-dependency
//! set difference computed after an upgrade relies on this total order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version comparison modifier of a dependency specification
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DepModifier {
    /// Any version satisfies the dependency
    #[default]
    Any,
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl DepModifier {
    fn symbol(self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Eq => "=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }
}

/// A dependency specification (`name>=version: description`)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub modifier: DepModifier,
    pub version: Option<String>,
    /// Free-form reason, present on optional dependencies.
    pub description: Option<String>,
}

impl Dependency {
    /// Create an unversioned dependency
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a versioned dependency
    pub fn versioned(name: impl Into<String>, modifier: DepModifier, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifier,
            version: Some(version.into()),
            description: None,
        }
    }

    /// Attach a description (optional-dependency reason)
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, "{}{version}", self.modifier.symbol())?;
        }
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}
