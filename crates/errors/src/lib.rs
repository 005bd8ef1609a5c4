#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the pkgd transaction core
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone for easier handling.

use thiserror::Error;

pub mod engine;
pub mod session;

pub use engine::EngineErrorKind;
pub use session::SessionError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
