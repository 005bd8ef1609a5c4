//! Buffered multi-line output scoped to the package being processed
//!
//! Scriptlet lines, optional-dependency notes, and question explanations
//! accumulate here and are emitted as one message per package. At most one
//! buffer is open at a time; opening another flushes the previous one.

use pkgd_events::{AppEvent, EventEmitter, EventSender, PackageEvent};
use pkgd_types::Package;

#[derive(Debug, Default)]
pub(crate) struct OutputBuffer {
    open: Option<Package>,
    text: String,
}

impl OutputBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open a buffer for `package`, flushing any previously open one.
    pub(crate) fn open(&mut self, package: Package, tx: &EventSender) {
        if self.open.is_some() {
            self.close(tx);
        }
        self.open = Some(package);
    }

    /// Append text to the open buffer. No-op when nothing is open.
    ///
    /// The package-name header is written lazily on the first append, so a
    /// buffer that is never appended to produces no message at all.
    pub(crate) fn append(&mut self, text: &str) {
        let Some(package) = &self.open else {
            return;
        };
        if self.text.is_empty() {
            self.text.push_str("**");
            self.text.push_str(&package.name);
            self.text.push_str("**\n");
        }
        self.text.push_str(text);
    }

    /// Flush and close the buffer; emits nothing when the buffer is empty.
    pub(crate) fn close(&mut self, tx: &EventSender) {
        let Some(package) = self.open.take() else {
            return;
        };
        if self.text.is_empty() {
            return;
        }
        tx.emit(AppEvent::Package(PackageEvent::Message {
            package: package.id(),
            text: std::mem::take(&mut self.text),
        }));
    }
}
