//! Failure diagnostics
//!
//! Turns the engine's failure payload lists into one human-readable
//! message, `"<offenders>: <engine error text>"`. Payloads are consumed by
//! value; every node is dropped no matter which branch formats it.

use pkgd_engine::{Conflict, DepMissing, EngineFailure, FailurePayload, FileConflict};
use pkgd_errors::{EngineErrorKind, SessionError};

/// Which lifecycle step produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailureStep {
    Prepare,
    Commit,
}

/// Build the session error for one engine failure.
pub(crate) fn build(step: FailureStep, failure: EngineFailure) -> SessionError {
    let EngineFailure {
        kind,
        message,
        payload,
    } = failure;

    let prefix = match (kind, payload) {
        (EngineErrorKind::InvalidArch, FailurePayload::InvalidArch { packages })
        | (EngineErrorKind::InvalidPackage, FailurePayload::InvalidPackages { packages }) => {
            name_list(packages)
        }
        (EngineErrorKind::UnsatisfiedDeps, FailurePayload::MissingDeps { misses }) => {
            miss_list(misses)
        }
        (EngineErrorKind::ConflictingDeps, FailurePayload::Conflicts { conflicts }) => {
            conflict_list(conflicts)
        }
        (EngineErrorKind::FileConflicts, FailurePayload::FileConflicts { conflicts }) => {
            file_conflict_list(conflicts)
        }
        (_, FailurePayload::None) => None,
        (kind, payload) => {
            tracing::warn!("unhandled failure payload for {kind}: {payload:?}");
            None
        }
    };

    let message = match prefix {
        Some(prefix) => format!("{prefix}: {message}"),
        None => message,
    };

    match step {
        FailureStep::Prepare => SessionError::Prepare { kind, message },
        FailureStep::Commit => SessionError::Commit { kind, message },
    }
}

fn name_list(packages: Vec<String>) -> Option<String> {
    if packages.is_empty() {
        return None;
    }
    Some(packages.join(", "))
}

fn miss_list(misses: Vec<DepMissing>) -> Option<String> {
    if misses.is_empty() {
        return None;
    }
    let entries: Vec<String> = misses
        .into_iter()
        .map(|miss| format!("{} <- {}", miss.depend, miss.target))
        .collect();
    Some(entries.join(", "))
}

fn conflict_list(conflicts: Vec<Conflict>) -> Option<String> {
    if conflicts.is_empty() {
        return None;
    }
    let entries: Vec<String> = conflicts
        .into_iter()
        .map(|conflict| {
            // the reason is noise when it is just one package's own name
            if conflict.reason.name == conflict.first || conflict.reason.name == conflict.second {
                format!("{} <-> {}", conflict.first, conflict.second)
            } else {
                format!(
                    "{} <-> {} ({})",
                    conflict.first, conflict.second, conflict.reason
                )
            }
        })
        .collect();
    Some(entries.join(", "))
}

fn file_conflict_list(conflicts: Vec<FileConflict>) -> Option<String> {
    if conflicts.is_empty() {
        return None;
    }
    let entries: Vec<String> = conflicts
        .into_iter()
        .map(|conflict| match conflict {
            FileConflict::Targets {
                target,
                conflicting,
                file,
            } => format!("{target} <-> {conflicting} ({file})"),
            FileConflict::Filesystem { target, file } => format!("{target} ({file})"),
        })
        .collect();
    Some(entries.join(", "))
}
