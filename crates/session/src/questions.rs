//! Automatic answers to the engine's interactive questions
//!
//! A non-interactive daemon cannot block on a prompt, so every question the
//! engine can raise has a fixed answer. Choices that unblock the
//! transaction (replace, resolve conflicts, remove dependents) are
//! pre-approved; key import is conservatively refused.

use pkgd_engine::{Question, QuestionAnswer};
use pkgd_types::Role;

use crate::session::Session;

impl Session {
    pub(crate) fn on_question(&mut self, question: &Question) -> QuestionAnswer {
        match question {
            Question::InstallIgnored { package } => match self.role {
                Role::InstallPackages => {
                    self.output
                        .append(&format!("{}: was not ignored\n", package.name));
                    QuestionAnswer::Install { install: true }
                }
                Role::DownloadPackages => QuestionAnswer::Install { install: true },
                _ => QuestionAnswer::Install { install: false },
            },

            Question::Replace { old, new, .. } => {
                tracing::debug!("safe question: replace {} with {}", old.name, new.name);
                QuestionAnswer::Replace { replace: true }
            }

            Question::Conflict { .. } | Question::Corrupted { .. } => {
                tracing::debug!("safe question: {question:?}");
                QuestionAnswer::Remove { remove: true }
            }

            Question::RemoveDependents { .. } => {
                tracing::debug!("unsafe question: {question:?}");
                QuestionAnswer::Skip { skip: false }
            }

            // TODO: allow import when the fingerprint is in a configured
            // trusted-key list
            Question::ImportKey { fingerprint, .. } => {
                tracing::debug!("unsafe question: import key {fingerprint}");
                QuestionAnswer::Import { import: false }
            }

            Question::SelectProvider {
                providers,
                dependency,
            } => {
                if let Some(provider) = providers.first() {
                    self.output.append(&format!(
                        "provider package was selected ({} provides {})\n",
                        provider.name, dependency.name
                    ));
                }
                QuestionAnswer::UseIndex { index: 0 }
            }

            other => {
                tracing::warn!("unknown question {other:?}");
                QuestionAnswer::Default
            }
        }
    }
}
