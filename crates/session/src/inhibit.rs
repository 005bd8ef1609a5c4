//! Platform inhibitor acquisition scoped to the engine commit
//!
//! While packages are being written to disk the daemon must hold off
//! shutdown and sleep. The guard is acquired immediately before the engine
//! commit call and dropped immediately after it returns, on error paths
//! included.

/// Provider of a platform-level inhibit (power management, shutdown).
///
/// The returned guard holds the inhibit; releasing happens in the guard's
/// `Drop`. The daemon supplies the real implementation; [`NoInhibit`] is the
/// no-op for tests and platforms without an inhibit facility.
pub trait Inhibitor {
    type Guard;

    /// Acquire the inhibit for the duration of the returned guard.
    fn inhibit(&self) -> Self::Guard;
}

/// Inhibitor that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInhibit;

impl Inhibitor for NoInhibit {
    type Guard = ();

    fn inhibit(&self) -> Self::Guard {}
}
