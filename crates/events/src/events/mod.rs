//! Domain event enums and the top-level aggregate

pub mod general;
pub mod job;
pub mod package;

pub use general::GeneralEvent;
pub use job::JobEvent;
pub use package::PackageEvent;

use serde::{Deserialize, Serialize};

/// Top-level event enum aggregating all domains
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// Transaction-wide state: status, percentages, cancellability, failures
    Job(JobEvent),

    /// Per-package notifications, messages, and file lists
    Package(PackageEvent),

    /// General utility events (warnings, debug logs)
    General(GeneralEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::Job(JobEvent::Failed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. }) => Level::WARN,

            // Progress updates are frequent; keep them out of info logs
            Self::Job(JobEvent::Percentage { .. } | JobEvent::ItemPercentage { .. })
            | Self::General(GeneralEvent::DebugLog { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::Job(_) => "pkgd::events::job",
            Self::Package(_) => "pkgd::events::package",
            Self::General(_) => "pkgd::events::general",
        }
    }
}
