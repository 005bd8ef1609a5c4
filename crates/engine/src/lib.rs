#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Abstraction of the native package engine
//!
//! The engine (ALPM, APT, DNF, ...) owns dependency resolution and package
//! installation. This crate defines the seam between one engine transaction
//! and the session that observes it: the `Engine` trait the session drives,
//! and the `TransactionObserver` trait the engine calls back into.
//!
//! All callbacks are delivered synchronously and re-entrantly on the thread
//! that invoked `prepare`/`commit`; observer state needs no locking.

pub mod cancel;
pub mod download;
pub mod event;
pub mod failure;
pub mod progress;
pub mod question;

pub use cancel::CancelToken;
pub use download::{DownloadEvent, DownloadTotal};
pub use event::{PackageOperation, TransactionEvent};
pub use failure::{Conflict, DepMissing, EngineFailure, FailurePayload, FileConflict};
pub use progress::ProgressKind;
pub use question::{Question, QuestionAnswer};

use pkgd_types::Package;

/// One native engine transaction, as driven by the session.
pub trait Engine {
    /// Packages the transaction will install or upgrade
    fn pending_adds(&self) -> Vec<Package>;

    /// Packages the transaction will remove
    fn pending_removals(&self) -> Vec<Package>;

    /// Look up an installed package by name
    fn installed(&self, name: &str) -> Option<Package>;

    /// Resolve dependencies and run pre-commit checks.
    ///
    /// The engine may raise questions and report events through `observer`
    /// while preparing.
    ///
    /// # Errors
    ///
    /// Returns an `EngineFailure` carrying the engine's error code and, for
    /// resolution failures, the offending-package payload.
    fn prepare(&mut self, observer: &mut dyn TransactionObserver) -> Result<(), EngineFailure>;

    /// Execute the prepared transaction.
    ///
    /// The engine polls `cancel` at its safe points and aborts the commit
    /// when cancellation was requested. Cancellation is cooperative; the
    /// commit may still return after partial progress.
    ///
    /// # Errors
    ///
    /// Returns an `EngineFailure` carrying the engine's error code and, for
    /// conflict or validation failures, the offending-package payload.
    fn commit(
        &mut self,
        observer: &mut dyn TransactionObserver,
        cancel: &CancelToken,
    ) -> Result<(), EngineFailure>;

    /// Release the transaction and its locks.
    ///
    /// # Errors
    ///
    /// Returns an `EngineFailure` when the engine cannot release cleanly.
    fn release(&mut self) -> Result<(), EngineFailure>;
}

/// Receiver of the engine's four callback kinds.
///
/// Implemented by the transaction session; passed explicitly into
/// `Engine::prepare` and `Engine::commit` instead of being registered as
/// process-wide callbacks.
pub trait TransactionObserver {
    /// A discrete lifecycle event occurred
    fn handle_event(&mut self, event: TransactionEvent);

    /// The engine needs a decision that would otherwise be interactive
    fn answer_question(&mut self, question: &Question) -> QuestionAnswer;

    /// Continuous progress of one engine phase.
    ///
    /// `percent` is within `[0, 100]` and `current` within `[1, targets]`
    /// for well-behaved engines, but counters are occasionally off-by-one at
    /// phase boundaries; implementations validate rather than trust.
    fn report_progress(
        &mut self,
        kind: ProgressKind,
        target: &str,
        percent: i32,
        targets: usize,
        current: usize,
    );

    /// Download activity for one file
    fn handle_download(&mut self, filename: &str, event: DownloadEvent);
}
