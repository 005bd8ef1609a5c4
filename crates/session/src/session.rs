//! Session lifecycle and callback wiring

use std::cell::Cell;

use pkgd_engine::{
    CancelToken, DownloadEvent, DownloadTotal, Engine, EngineFailure, ProgressKind, Question,
    QuestionAnswer, TransactionEvent, TransactionObserver,
};
use pkgd_errors::SessionError;
use pkgd_events::{AppEvent, EventEmitter, EventSender, JobEvent, PackageEvent};
use pkgd_types::{Package, PackageInfo, Role, Status};

use crate::config::SessionConfig;
use crate::diagnostics::{self, FailureStep};
use crate::download::DownloadTracker;
use crate::inhibit::Inhibitor;
use crate::output::OutputBuffer;
use crate::progress::ProgressStamp;

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// One in-progress engine transaction being observed and orchestrated.
///
/// The session is handed to `Engine::prepare`/`Engine::commit` as the
/// callback observer; between those calls the caller drives the lifecycle:
/// `begin` → `prepare` → (`emit_pending` | `commit`) → `end`.
pub struct Session {
    pub(crate) role: Role,
    pub(crate) status: Status,
    pub(crate) last_percentage: Option<u32>,
    pub(crate) allow_cancel: bool,
    pub(crate) cancel: CancelToken,
    pub(crate) config: SessionConfig,
    pub(crate) tx: EventSender,
    /// Snapshot of the engine's pending-add set, used to correlate download
    /// basenames with packages while the engine is mutably borrowed.
    pub(crate) pending_adds: Vec<Package>,
    pub(crate) output: OutputBuffer,
    pub(crate) downloads: DownloadTracker,
    pub(crate) progress: ProgressStamp,
}

impl Session {
    /// Begin observing a transaction.
    ///
    /// # Panics
    ///
    /// Panics if another session is still active on this worker thread;
    /// exactly one session may exist per worker at a time, and creating a
    /// second is a programming error in the caller.
    #[must_use]
    pub fn begin(role: Role, config: SessionConfig, tx: EventSender) -> Self {
        ACTIVE.with(|active| {
            assert!(
                !active.get(),
                "a transaction session is already active on this worker"
            );
            active.set(true);
        });

        Self {
            role,
            status: Status::Unknown,
            last_percentage: None,
            allow_cancel: true,
            cancel: CancelToken::new(),
            config,
            tx,
            pending_adds: Vec::new(),
            output: OutputBuffer::new(),
            downloads: DownloadTracker::new(),
            progress: ProgressStamp::new(),
        }
    }

    /// The requested operation this session serves
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Current transaction status
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether cancellation is currently allowed
    #[must_use]
    pub fn allow_cancel(&self) -> bool {
        self.allow_cancel
    }

    /// A token the caller can hand to another thread to request
    /// cancellation. Cancellation is cooperative and never synchronous.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Declare the expected byte total for this transaction's downloads
    pub fn set_download_total(&mut self, total: DownloadTotal) {
        self.downloads.total = total;
    }

    /// Resolve dependencies and run the engine's pre-commit checks.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Prepare` carrying a human-readable description
    /// of the offending packages when the engine rejects the transaction.
    pub fn prepare<E: Engine>(&mut self, engine: &mut E) -> Result<(), SessionError> {
        match engine.prepare(self) {
            Ok(()) => {
                self.pending_adds = engine.pending_adds();
                Ok(())
            }
            Err(failure) => Err(diagnostics::build(FailureStep::Prepare, failure)),
        }
    }

    /// Report the packages a prepared transaction would touch, without
    /// committing anything.
    pub fn emit_pending<E: Engine>(&mut self, engine: &E) {
        for package in engine.pending_adds() {
            if self.cancel.is_cancelled() {
                break;
            }
            let info = if engine.installed(&package.name).is_some() {
                PackageInfo::Updating
            } else {
                PackageInfo::Installing
            };
            self.notify(info, &package);
        }

        let info = if self.role == Role::UpdatePackages {
            PackageInfo::Obsoleting
        } else {
            PackageInfo::Removing
        };
        for package in engine.pending_removals() {
            if self.cancel.is_cancelled() {
                break;
            }
            self.notify(info, &package);
        }
    }

    /// Execute the prepared transaction.
    ///
    /// Once commit starts the transaction can no longer be cancelled
    /// gracefully, so cancellation is disallowed first. The platform
    /// inhibit is held exactly for the duration of the engine commit call
    /// and released on every path.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Commit` carrying a human-readable description
    /// of the failure when the engine aborts the commit. A commit that was
    /// cancelled before it started is a silent success.
    pub fn commit<E: Engine, I: Inhibitor>(
        &mut self,
        engine: &mut E,
        inhibitor: &I,
    ) -> Result<(), SessionError> {
        if self.cancel.is_cancelled() {
            return Ok(());
        }

        self.set_allow_cancel(false);
        self.set_status(Status::Running);
        self.pending_adds = engine.pending_adds();

        let cancel = self.cancel.clone();
        let result = {
            let _inhibit = inhibitor.inhibit();
            engine.commit(self, &cancel)
        };

        result.map_err(|failure| diagnostics::build(FailureStep::Commit, failure))
    }

    /// End the session: force-finalize any open download and output state
    /// so no notification or message is lost, then release the engine
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Release` when the engine cannot release the
    /// transaction cleanly.
    pub fn end<E: Engine>(mut self, engine: &mut E) -> Result<(), SessionError> {
        if self.downloads.cursor.is_some() {
            self.download_end();
        }
        self.output.close(&self.tx);

        engine.release().map_err(|failure| {
            let EngineFailure { kind, message, .. } = failure;
            SessionError::Release { kind, message }
        })
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        if self.status == status {
            return;
        }
        self.status = status;
        self.emit(AppEvent::Job(JobEvent::StatusChanged { status }));
    }

    pub(crate) fn set_percentage(&mut self, percent: u32) {
        if self.last_percentage == Some(percent) {
            return;
        }
        self.last_percentage = Some(percent);
        self.emit(AppEvent::Job(JobEvent::Percentage { percent }));
    }

    pub(crate) fn set_allow_cancel(&mut self, allow: bool) {
        if self.allow_cancel == allow {
            return;
        }
        self.allow_cancel = allow;
        self.emit(AppEvent::Job(JobEvent::AllowCancel { allow }));
    }

    pub(crate) fn emit_item_percentage(&self, target: &str, percent: u32) {
        self.emit(AppEvent::Job(JobEvent::ItemPercentage {
            target: target.to_owned(),
            percent,
        }));
    }

    pub(crate) fn notify(&self, info: PackageInfo, package: &Package) {
        self.emit(AppEvent::Package(PackageEvent::Notified {
            info,
            package: package.id(),
        }));
    }
}

impl EventEmitter for Session {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

impl TransactionObserver for Session {
    fn handle_event(&mut self, event: TransactionEvent) {
        self.on_event(event);
    }

    fn answer_question(&mut self, question: &Question) -> QuestionAnswer {
        self.on_question(question)
    }

    fn report_progress(
        &mut self,
        kind: ProgressKind,
        target: &str,
        percent: i32,
        targets: usize,
        current: usize,
    ) {
        self.on_progress(kind, target, percent, targets, current);
    }

    fn handle_download(&mut self, filename: &str, event: DownloadEvent) {
        self.on_download(filename, event);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        ACTIVE.with(|active| active.set(false));
    }
}
