//! Progress aggregation across engine phases
//!
//! The engine reports per-item percentages together with the item's index
//! in the current phase; the session folds those into one overall 0-100
//! figure that never decreases within a phase. One-shot gate phases
//! (signature, conflict, disk-space checks) arrive through the same
//! callback with an empty target name and are handled as status
//! checkpoints.

use pkgd_engine::ProgressKind;
use pkgd_types::Status;

use crate::session::Session;

/// Duplicate-suppression stamp for per-item progress reports.
#[derive(Debug)]
pub(crate) struct ProgressStamp {
    /// Most recently reported per-item percent; 101 means none yet.
    pub(crate) recent: i32,
}

impl ProgressStamp {
    pub(crate) fn new() -> Self {
        Self { recent: 101 }
    }
}

impl Session {
    pub(crate) fn on_progress(
        &mut self,
        kind: ProgressKind,
        target: &str,
        percent: i32,
        targets: usize,
        current: usize,
    ) {
        let mut current = current;
        let mut overall = i64::from(percent) + (current as i64 - 1) * 100;

        if target.is_empty() {
            match kind {
                ProgressKind::KeyringStart | ProgressKind::IntegrityStart => {
                    self.set_status(Status::SigCheck);
                    self.set_percentage(percent.clamp(0, 100) as u32);
                }
                ProgressKind::LoadStart => {
                    self.set_status(Status::LoadingCache);
                    self.set_percentage(percent.clamp(0, 100) as u32);
                }
                ProgressKind::DiskspaceStart | ProgressKind::ConflictsStart => {
                    self.set_status(Status::TestCommit);
                    self.set_percentage(percent.clamp(0, 100) as u32);
                }
                other => {
                    tracing::warn!("progress report without a target: {other:?}");
                }
            }
        }

        // The engine counts a finished gate phase as one of the targets;
        // step past it so the running figure does not fall back when the
        // next phase starts reporting.
        if kind.is_checkpoint() && current < targets {
            current += 1;
            overall += 100;
        }

        // Engine counters are occasionally off-by-one at phase boundaries;
        // log and drop rather than propagate a bogus figure.
        if !(0..=100).contains(&percent) || current < 1 || targets < current {
            tracing::warn!(
                "progress report out of range: {percent}% ({current} of {targets}) for {kind:?}"
            );
            return;
        }

        match kind {
            k if k.is_package_operation() => {
                if percent != self.progress.recent {
                    self.set_percentage((overall / targets as i64) as u32);
                    self.progress.recent = percent;
                }
                self.emit_item_percentage(target, percent as u32);
                tracing::debug!("{percent}% of {target} complete ({current} of {targets})");
            }
            k if k.is_checkpoint() => {}
            other => tracing::warn!("unknown progress type {other:?}"),
        }
    }
}
