#![deny(clippy::pedantic, unsafe_code)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation, // Progress percentages are bounded before casting
    clippy::cast_possible_wrap,       // Target counts never approach i64::MAX
    clippy::cast_sign_loss            // Engine percents are validated to [0, 100] first
)]

//! Transaction session orchestration for pkgd
//!
//! One `Session` observes one native engine transaction from begin to
//! release. It consumes the engine's event, question, progress, and download
//! callbacks and produces a coherent stream of status changes, monotonic
//! percentages, package notifications, and buffered per-package messages,
//! while answering the engine's interactive questions with a fixed
//! non-interactive policy.
//!
//! The session owns all callback state explicitly; nothing in this crate is
//! a process-wide global. All callbacks arrive synchronously on the thread
//! driving `prepare`/`commit`, so no locking is involved.

mod config;
mod diagnostics;
mod download;
mod inhibit;
mod output;
mod progress;
mod questions;
mod session;
mod status;

pub use config::SessionConfig;
pub use inhibit::{Inhibitor, NoInhibit};
pub use session::Session;
