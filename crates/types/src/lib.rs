#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Shared type definitions for the pkgd transaction core
//!
//! Plain data passed between the native engine adapter, the transaction
//! session, and the event stream. Package versions are opaque engine
//! strings (`epoch:pkgver-pkgrel` and friends), deliberately not parsed.

pub mod dependency;
pub mod package;
pub mod status;

pub use dependency::{DepModifier, Dependency};
pub use package::{Package, PackageId};
pub use status::{ErrorCode, PackageInfo, Role, Status};
