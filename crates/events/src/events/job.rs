use pkgd_types::{ErrorCode, Status};
use serde::{Deserialize, Serialize};

/// Transaction-wide events for the event system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JobEvent {
    /// The transaction moved to a new lifecycle status
    StatusChanged { status: Status },

    /// Overall progress, 0-100, monotonic within one phase
    Percentage { percent: u32 },

    /// Progress of the item currently being processed, keyed by the
    /// target name the engine reports
    ItemPercentage { target: String, percent: u32 },

    /// Whether the caller may still cancel the transaction
    AllowCancel { allow: bool },

    /// A job-level failure surfaced mid-transaction
    Failed { code: ErrorCode, message: String },
}
