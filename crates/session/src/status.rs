//! Status mapping: engine lifecycle events to session status and side
//! effects
//!
//! Each event is handled exactly once, synchronously, before the engine
//! continues. Events the engine raises purely as chatter are matched
//! explicitly and dropped; anything unrecognized is logged at warning level
//! so new engine versions degrade to noise instead of failure.

use std::cmp::Ordering;

use pkgd_engine::{PackageOperation, TransactionEvent};
use pkgd_events::{AppEvent, EventEmitter, JobEvent};
use pkgd_types::{Dependency, ErrorCode, Package, PackageInfo, Role, Status};

use crate::session::Session;

const AUDIT_TARGET: &str = "pkgd::audit";

impl Session {
    pub(crate) fn on_event(&mut self, event: TransactionEvent) {
        match event {
            TransactionEvent::CheckDepsStart | TransactionEvent::ResolveDepsStart => {
                self.set_status(Status::DepResolve);
            }
            TransactionEvent::DiskspaceStart
            | TransactionEvent::FileConflictsStart
            | TransactionEvent::InterConflictsStart => {
                self.set_status(Status::TestCommit);
            }
            TransactionEvent::PackageOperationStart(op) => self.package_op_start(op),
            TransactionEvent::PackageOperationDone(op) => self.package_op_done(&op),
            TransactionEvent::IntegrityStart | TransactionEvent::KeyringStart => {
                self.set_status(Status::SigCheck);
            }
            TransactionEvent::LoadStart => self.set_status(Status::Setup),
            TransactionEvent::ScriptletInfo { line } => self.output.append(&line),
            TransactionEvent::KeyDownloadStart | TransactionEvent::DbRetrieveStart => {
                self.set_status(Status::Download);
            }
            TransactionEvent::OptDepRemoval {
                package,
                dependency,
            } => self.optdep_removal(&package, &dependency),
            TransactionEvent::HookStart => {
                self.set_status(Status::RunHook);
                self.set_percentage(0);
            }
            TransactionEvent::HookRunDone {
                name,
                description,
                position,
                total,
            } => self.hook_run_done(&name, &description, position, total),

            // chatter the engine raises that has no user-facing meaning
            TransactionEvent::CheckDepsDone
            | TransactionEvent::ResolveDepsDone
            | TransactionEvent::DiskspaceDone
            | TransactionEvent::FileConflictsDone
            | TransactionEvent::InterConflictsDone
            | TransactionEvent::IntegrityDone
            | TransactionEvent::KeyringDone
            | TransactionEvent::KeyDownloadDone
            | TransactionEvent::LoadDone
            | TransactionEvent::HookDone
            | TransactionEvent::HookRunStart
            | TransactionEvent::DbRetrieveDone
            | TransactionEvent::DbRetrieveFailed
            | TransactionEvent::PkgRetrieveStart
            | TransactionEvent::PkgRetrieveDone
            | TransactionEvent::PkgRetrieveFailed
            | TransactionEvent::DatabaseMissing { .. }
            | TransactionEvent::PacnewCreated { .. }
            | TransactionEvent::PacsaveCreated { .. }
            | TransactionEvent::TransactionStart
            | TransactionEvent::TransactionDone => {}

            other => tracing::warn!("unhandled engine event {other:?}"),
        }
    }

    fn package_op_start(&mut self, op: PackageOperation) {
        match op {
            PackageOperation::Install { new } => {
                self.set_status(Status::Install);
                self.notify(PackageInfo::Installing, &new);
                self.output.open(new, &self.tx);
            }
            PackageOperation::Remove { old } => {
                self.set_status(Status::Remove);
                self.notify(PackageInfo::Removing, &old);
                self.output.open(old, &self.tx);
            }
            PackageOperation::Upgrade { new, .. }
            | PackageOperation::Downgrade { new, .. }
            | PackageOperation::Reinstall { new, .. } => {
                // installing a local file shows up to the engine as an
                // upgrade of itself
                let (status, info) = if self.role == Role::InstallFiles {
                    (Status::Install, PackageInfo::Installing)
                } else {
                    (Status::Update, PackageInfo::Updating)
                };
                self.set_status(status);
                self.notify(info, &new);
                self.output.open(new, &self.tx);
            }
        }
    }

    fn package_op_done(&mut self, op: &PackageOperation) {
        assert!(
            self.output.is_open(),
            "engine reported a package operation done without a matching start"
        );

        match op {
            PackageOperation::Install { new } => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    "installed {} ({})", new.name, new.version
                );
                self.notify(PackageInfo::Finished, new);
                if !new.optional_deps.is_empty() {
                    self.output.append("Optional dependencies:\n");
                    for dep in &new.optional_deps {
                        self.output.append(&format!("{dep}\n"));
                    }
                }
            }
            PackageOperation::Remove { old } => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    "removed {} ({})", old.name, old.version
                );
                self.notify(PackageInfo::Finished, old);
            }
            PackageOperation::Upgrade { new, old } => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    "upgraded {} ({} -> {})", new.name, old.version, new.version
                );
                self.notify(PackageInfo::Finished, new);
                self.process_new_optdepends(new, old);
            }
            PackageOperation::Downgrade { new, old } => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    "downgraded {} ({} -> {})", new.name, old.version, new.version
                );
                self.notify(PackageInfo::Finished, new);
                self.process_new_optdepends(new, old);
            }
            PackageOperation::Reinstall { new, .. } => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    "reinstalled {} ({})", new.name, new.version
                );
                self.notify(PackageInfo::Finished, new);
            }
        }
        self.output.close(&self.tx);
    }

    /// Write the optional dependencies gained by `new` relative to `old`
    /// into the output buffer. Nothing is written when the sets are equal.
    fn process_new_optdepends(&mut self, new: &Package, old: &Package) {
        let added = optdep_diff(&new.optional_deps, &old.optional_deps);
        if added.is_empty() {
            return;
        }

        self.output.append("New optional dependencies:\n");
        for dep in added {
            self.output.append(&format!("{dep}\n"));
        }
    }

    /// A package is no longer optionally required by anything. Surfaced as
    /// a dependency-resolution failure naming the package so the side
    /// effect is visible rather than silent.
    fn optdep_removal(&mut self, package: &Package, dependency: &Dependency) {
        self.emit(AppEvent::Job(JobEvent::Failed {
            code: ErrorCode::DepResolutionFailed,
            message: format!("{}\noptionally requires {dependency}", package.name),
        }));
    }

    /// Every hook runs a single command and reports no continuous
    /// progress; the phase percentage is derived from the hook count.
    fn hook_run_done(&mut self, name: &str, description: &str, position: usize, total: usize) {
        if total == 0 {
            tracing::warn!("hook completion with a zero hook count");
            return;
        }
        self.set_percentage((100 * position / total) as u32);
        tracing::debug!("hook {name} ({description}) complete ({position} of {total})");
    }
}

/// Entries of `new` that are not in `old`, in sorted order.
fn optdep_diff(new: &[Dependency], old: &[Dependency]) -> Vec<Dependency> {
    let mut new_sorted = new.to_vec();
    new_sorted.sort();
    let mut old_sorted = old.to_vec();
    old_sorted.sort();

    let mut added = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < new_sorted.len() && j < old_sorted.len() {
        match new_sorted[i].cmp(&old_sorted[j]) {
            Ordering::Less => {
                added.push(new_sorted[i].clone());
                i += 1;
            }
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    added.extend_from_slice(&new_sorted[i..]);
    added
}
