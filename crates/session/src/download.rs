//! Download session tracking
//!
//! Correlates the engine's per-file download callbacks with the packages in
//! the pending-add set, accumulates byte counts into the overall
//! percentage, and collects retrieved file paths when the caller asked for
//! a download-only transaction.

use std::path::PathBuf;

use pkgd_engine::{DownloadEvent, DownloadTotal};
use pkgd_events::{AppEvent, EventEmitter, PackageEvent};
use pkgd_types::{Package, PackageInfo, Role, Status};

use crate::session::Session;

/// The package currently being fetched.
#[derive(Debug)]
pub(crate) struct DownloadCursor {
    pub(crate) package: Package,
    /// Paths retrieved for this package, in call order. Only collected for
    /// download-only transactions.
    pub(crate) files: Option<Vec<PathBuf>>,
}

#[derive(Debug)]
pub(crate) struct DownloadTracker {
    pub(crate) cursor: Option<DownloadCursor>,
    pub(crate) total: DownloadTotal,
    /// Bytes of fully completed downloads.
    pub(crate) completed_bytes: u64,
    /// Last per-item byte total seen; a change marks the next
    /// indeterminate part.
    previous_item_total: u64,
    current_part: u32,
}

impl DownloadTracker {
    pub(crate) fn new() -> Self {
        Self {
            cursor: None,
            total: DownloadTotal::Unknown,
            completed_bytes: 0,
            previous_item_total: 0,
            current_part: 0,
        }
    }
}

impl Session {
    pub(crate) fn on_download(&mut self, filename: &str, event: DownloadEvent) {
        match event {
            DownloadEvent::Init => {
                self.set_status(Status::Download);
                self.download_start(filename);
            }
            DownloadEvent::Progress { downloaded, total } => {
                self.download_progress(downloaded, total);
            }
            DownloadEvent::Completed { total } => self.download_completed(total),
            other => {
                tracing::warn!("unhandled download callback {other:?}, likely an engine change");
            }
        }
    }

    /// Begin (or continue) tracking the download of `basename`.
    fn download_start(&mut self, basename: &str) {
        // continue or finish the package currently being fetched
        let same_package = self
            .downloads
            .cursor
            .as_ref()
            .is_some_and(|cursor| cursor.package.has_basename(basename));
        if same_package {
            // another part of the same logical package
            let path = self.config.resolve_path(basename);
            if let Some(files) = self
                .downloads
                .cursor
                .as_mut()
                .and_then(|cursor| cursor.files.as_mut())
            {
                files.push(path);
            }
            return;
        }
        if self.downloads.cursor.is_some() {
            self.download_end();
        }

        // figure out what the next package is; files that match nothing in
        // the pending-add set (repository metadata) are not notified about
        let Some(package) = self
            .pending_adds
            .iter()
            .find(|package| package.has_basename(basename))
            .cloned()
        else {
            return;
        };

        self.notify(PackageInfo::Downloading, &package);

        let files = (self.role == Role::DownloadPackages)
            .then(|| vec![self.config.resolve_path(basename)]);
        self.downloads.cursor = Some(DownloadCursor { package, files });
    }

    /// Finalize the download in progress: emit its finished notification
    /// and, for download-only transactions, the collected file paths.
    pub(crate) fn download_end(&mut self) {
        let Some(cursor) = self.downloads.cursor.take() else {
            return;
        };

        self.notify(PackageInfo::Finished, &cursor.package);

        if let Some(paths) = cursor.files {
            self.emit(AppEvent::Package(PackageEvent::Files {
                package: cursor.package.id(),
                paths,
            }));
        }
    }

    fn download_progress(&mut self, downloaded: u64, item_total: u64) {
        match self.downloads.total {
            DownloadTotal::Known { bytes } if bytes > 0 => {
                let done = self.downloads.completed_bytes.saturating_add(downloaded);
                let percent = (done.saturating_mul(100) / bytes).min(100);
                self.set_percentage(percent as u32);
            }
            DownloadTotal::IndeterminateParts { count } if count > 0 => {
                // e.g. fetching N repository databases of unknown size:
                // each part contributes an equal slice, completion within a
                // slice comes from the item's own percent
                if item_total != self.downloads.previous_item_total {
                    self.downloads.current_part += 1;
                    self.downloads.previous_item_total = item_total;
                }

                let part = u64::from(self.downloads.current_part.max(1));
                let parts = u64::from(count);
                let sub_percent = if item_total > 0 {
                    (downloaded.saturating_mul(100) / item_total).min(100)
                } else {
                    100
                };
                let percent = (part - 1) * 100 / parts + sub_percent / parts;
                self.set_percentage(percent.min(100) as u32);
            }
            _ => {}
        }
    }

    fn download_completed(&mut self, total: u64) {
        self.downloads.completed_bytes = self.downloads.completed_bytes.saturating_add(total);
        if let Some(cursor) = &self.downloads.cursor {
            let target = cursor.package.name.clone();
            self.emit_item_percentage(&target, 100);
        }
    }
}
