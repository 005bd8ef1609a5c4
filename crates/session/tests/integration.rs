//! Integration tests for the transaction session
//!
//! A scripted mock engine stands in for the native package engine; events
//! are collected from the channel and asserted on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use pkgd_engine::{
    CancelToken, DepMissing, DownloadEvent, DownloadTotal, Engine, EngineFailure, FailurePayload,
    PackageOperation, ProgressKind, Question, QuestionAnswer, TransactionEvent,
    TransactionObserver,
};
use pkgd_errors::{EngineErrorKind, SessionError};
use pkgd_events::{channel, AppEvent, EventReceiver, JobEvent, PackageEvent};
use pkgd_session::{Inhibitor, NoInhibit, Session, SessionConfig};
use pkgd_types::{DepModifier, Dependency, ErrorCode, Package, PackageInfo, Role, Status};

type CommitScript = Box<dyn FnMut(&mut dyn TransactionObserver) + Send>;

#[derive(Default)]
struct MockEngine {
    adds: Vec<Package>,
    removals: Vec<Package>,
    installed: Vec<Package>,
    prepare_error: Option<EngineFailure>,
    commit_error: Option<EngineFailure>,
    commit_script: Option<CommitScript>,
    committed: bool,
    released: bool,
}

impl Engine for MockEngine {
    fn pending_adds(&self) -> Vec<Package> {
        self.adds.clone()
    }

    fn pending_removals(&self) -> Vec<Package> {
        self.removals.clone()
    }

    fn installed(&self, name: &str) -> Option<Package> {
        self.installed.iter().find(|p| p.name == name).cloned()
    }

    fn prepare(&mut self, _observer: &mut dyn TransactionObserver) -> Result<(), EngineFailure> {
        match self.prepare_error.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn commit(
        &mut self,
        observer: &mut dyn TransactionObserver,
        _cancel: &CancelToken,
    ) -> Result<(), EngineFailure> {
        self.committed = true;
        if let Some(mut script) = self.commit_script.take() {
            script(observer);
        }
        match self.commit_error.take() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn release(&mut self) -> Result<(), EngineFailure> {
        self.released = true;
        Ok(())
    }
}

fn test_session(role: Role) -> (Session, EventReceiver) {
    let (tx, rx) = channel();
    let session = Session::begin(role, SessionConfig::new("/var/cache/test"), tx);
    (session, rx)
}

fn drain(rx: &mut EventReceiver) -> Vec<AppEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn percentages(events: &[AppEvent]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Job(JobEvent::Percentage { percent }) => Some(*percent),
            _ => None,
        })
        .collect()
}

fn statuses(events: &[AppEvent]) -> Vec<Status> {
    events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Job(JobEvent::StatusChanged { status }) => Some(*status),
            _ => None,
        })
        .collect()
}

fn notifications(events: &[AppEvent]) -> Vec<(PackageInfo, String)> {
    events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Package(PackageEvent::Notified { info, package }) => {
                Some((*info, package.name.clone()))
            }
            _ => None,
        })
        .collect()
}

fn messages(events: &[AppEvent]) -> Vec<(String, String)> {
    events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Package(PackageEvent::Message { package, text }) => {
                Some((package.name.clone(), text.clone()))
            }
            _ => None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// status mapping

#[test]
fn install_operation_reports_status_notifications_and_output() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let pkg = Package::new("foo", "1.0-1")
        .with_optional_deps(vec![Dependency::new("bar").with_description("for baz support")]);

    session.handle_event(TransactionEvent::PackageOperationStart(
        PackageOperation::Install { new: pkg.clone() },
    ));
    session.handle_event(TransactionEvent::ScriptletInfo {
        line: "post-install ran\n".into(),
    });
    session.handle_event(TransactionEvent::PackageOperationDone(
        PackageOperation::Install { new: pkg },
    ));

    let events = drain(&mut rx);
    assert_eq!(statuses(&events), vec![Status::Install]);
    assert_eq!(
        notifications(&events),
        vec![
            (PackageInfo::Installing, "foo".into()),
            (PackageInfo::Finished, "foo".into()),
        ]
    );
    assert_eq!(
        messages(&events),
        vec![(
            "foo".into(),
            "**foo**\npost-install ran\nOptional dependencies:\nbar: for baz support\n".into()
        )]
    );
}

#[test]
fn upgrade_with_unchanged_optional_deps_emits_no_message() {
    let (mut session, mut rx) = test_session(Role::UpdatePackages);
    let deps = vec![Dependency::new("bar")];
    let old = Package::new("foo", "1.0-1").with_optional_deps(deps.clone());
    let new = Package::new("foo", "2.0-1").with_optional_deps(deps);

    session.handle_event(TransactionEvent::PackageOperationStart(
        PackageOperation::Upgrade {
            new: new.clone(),
            old: old.clone(),
        },
    ));
    session.handle_event(TransactionEvent::PackageOperationDone(
        PackageOperation::Upgrade { new, old },
    ));

    let events = drain(&mut rx);
    assert_eq!(statuses(&events), vec![Status::Update]);
    assert_eq!(
        notifications(&events),
        vec![
            (PackageInfo::Updating, "foo".into()),
            (PackageInfo::Finished, "foo".into()),
        ]
    );
    assert!(messages(&events).is_empty());
}

#[test]
fn upgrade_reports_gained_optional_deps_sorted() {
    let (mut session, mut rx) = test_session(Role::UpdatePackages);
    let old = Package::new("foo", "1.0-1").with_optional_deps(vec![Dependency::new("kept")]);
    let new = Package::new("foo", "2.0-1").with_optional_deps(vec![
        Dependency::new("zeta"),
        Dependency::new("kept"),
        Dependency::versioned("alpha", DepModifier::Ge, "3"),
    ]);

    session.handle_event(TransactionEvent::PackageOperationStart(
        PackageOperation::Upgrade {
            new: new.clone(),
            old: old.clone(),
        },
    ));
    session.handle_event(TransactionEvent::PackageOperationDone(
        PackageOperation::Upgrade { new, old },
    ));

    let events = drain(&mut rx);
    assert_eq!(
        messages(&events),
        vec![(
            "foo".into(),
            "**foo**\nNew optional dependencies:\nalpha>=3\nzeta\n".into()
        )]
    );
}

#[test]
fn local_file_upgrade_is_reported_as_install() {
    let (mut session, mut rx) = test_session(Role::InstallFiles);
    let old = Package::new("foo", "1.0-1");
    let new = Package::new("foo", "1.0-1");

    session.handle_event(TransactionEvent::PackageOperationStart(
        PackageOperation::Reinstall {
            new: new.clone(),
            old: old.clone(),
        },
    ));
    session.handle_event(TransactionEvent::PackageOperationDone(
        PackageOperation::Reinstall { new, old },
    ));

    let events = drain(&mut rx);
    assert_eq!(statuses(&events), vec![Status::Install]);
    assert_eq!(
        notifications(&events),
        vec![
            (PackageInfo::Installing, "foo".into()),
            (PackageInfo::Finished, "foo".into()),
        ]
    );
}

#[test]
fn optional_dependency_removal_is_surfaced_as_error() {
    let (mut session, mut rx) = test_session(Role::RemovePackages);

    session.handle_event(TransactionEvent::OptDepRemoval {
        package: Package::new("foo", "1.0-1"),
        dependency: Dependency::new("bar").with_description("extra codecs"),
    });

    let events = drain(&mut rx);
    let failed: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Job(JobEvent::Failed { code, message }) => Some((*code, message.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, ErrorCode::DepResolutionFailed);
    assert_eq!(failed[0].1, "foo\noptionally requires bar: extra codecs");
}

#[test]
#[should_panic(expected = "without a matching start")]
fn package_done_without_start_fails_loudly() {
    let (mut session, _rx) = test_session(Role::InstallPackages);
    session.handle_event(TransactionEvent::PackageOperationDone(
        PackageOperation::Install {
            new: Package::new("foo", "1.0-1"),
        },
    ));
}

#[test]
fn hook_phase_progress_comes_from_hook_counters() {
    let (mut session, mut rx) = test_session(Role::UpdatePackages);

    session.handle_event(TransactionEvent::HookStart);
    for position in 1..=4 {
        session.handle_event(TransactionEvent::HookRunDone {
            name: format!("hook-{position}"),
            description: "a hook".into(),
            position,
            total: 4,
        });
    }

    let events = drain(&mut rx);
    assert_eq!(statuses(&events), vec![Status::RunHook]);
    assert_eq!(percentages(&events), vec![0, 25, 50, 75, 100]);
}

#[test]
fn ignored_engine_chatter_changes_nothing() {
    let (mut session, mut rx) = test_session(Role::UpdatePackages);

    session.handle_event(TransactionEvent::TransactionStart);
    session.handle_event(TransactionEvent::CheckDepsDone);
    session.handle_event(TransactionEvent::PacnewCreated {
        file: "/etc/pacman.conf.pacnew".into(),
    });
    session.handle_event(TransactionEvent::TransactionDone);

    assert!(drain(&mut rx).is_empty());
    assert_eq!(session.status(), Status::Unknown);
}

// ---------------------------------------------------------------------------
// progress aggregation

#[test]
fn package_progress_aggregates_across_targets() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);

    session.report_progress(ProgressKind::AddStart, "a", 0, 2, 1);
    session.report_progress(ProgressKind::AddStart, "a", 100, 2, 1);
    session.report_progress(ProgressKind::AddStart, "b", 50, 2, 2);
    session.report_progress(ProgressKind::AddStart, "b", 100, 2, 2);

    assert_eq!(percentages(&drain(&mut rx)), vec![0, 50, 75, 100]);
}

#[test]
fn duplicate_percent_suppresses_overall_but_still_reports_item() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);

    session.report_progress(ProgressKind::AddStart, "a", 40, 1, 1);
    session.report_progress(ProgressKind::AddStart, "a", 40, 1, 1);

    let events = drain(&mut rx);
    assert_eq!(percentages(&events), vec![40]);
    let items: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Job(JobEvent::ItemPercentage { target, percent }) => {
                Some((target.clone(), *percent))
            }
            _ => None,
        })
        .collect();
    assert_eq!(items, vec![("a".into(), 40), ("a".into(), 40)]);
}

#[test]
fn checkpoints_set_status_and_direct_percentage() {
    let (mut session, mut rx) = test_session(Role::UpdatePackages);

    session.report_progress(ProgressKind::IntegrityStart, "", 40, 2, 1);
    session.report_progress(ProgressKind::ConflictsStart, "", 60, 2, 2);

    let events = drain(&mut rx);
    assert_eq!(statuses(&events), vec![Status::SigCheck, Status::TestCommit]);
    assert_eq!(percentages(&events), vec![40, 60]);
}

#[test]
fn load_checkpoint_reports_cache_loading() {
    let (mut session, mut rx) = test_session(Role::UpdatePackages);

    session.report_progress(ProgressKind::LoadStart, "", 0, 1, 1);

    assert_eq!(statuses(&drain(&mut rx)), vec![Status::LoadingCache]);
}

#[test]
fn out_of_range_progress_reports_are_dropped() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);

    session.report_progress(ProgressKind::AddStart, "a", 150, 1, 1);
    session.report_progress(ProgressKind::AddStart, "a", 50, 2, 3);

    assert!(percentages(&drain(&mut rx)).is_empty());
}

proptest! {
    #[test]
    fn aggregated_percentage_never_decreases(
        runs in prop::collection::vec(prop::collection::vec(0u8..=100, 1..8), 1..5)
    ) {
        let targets = runs.len();
        let (mut session, mut rx) = test_session(Role::InstallPackages);

        for (index, mut run) in runs.into_iter().enumerate() {
            run.sort_unstable();
            for percent in run {
                session.report_progress(
                    ProgressKind::AddStart,
                    "pkg",
                    i32::from(percent),
                    targets,
                    index + 1,
                );
            }
        }

        let percents = percentages(&drain(&mut rx));
        prop_assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

// ---------------------------------------------------------------------------
// downloads

fn artifact(name: &str, version: &str) -> Package {
    Package::new(name, version).with_filename(format!("{name}-{version}.pkg.tar.zst"))
}

#[test]
fn repeated_init_for_one_package_collects_paths_and_notifies_once() {
    let (mut session, mut rx) = test_session(Role::DownloadPackages);
    let mut engine = MockEngine {
        adds: vec![artifact("foo", "1.0-1")],
        ..MockEngine::default()
    };
    session.prepare(&mut engine).unwrap();

    session.handle_download("foo-1.0-1.pkg.tar.zst", DownloadEvent::Init);
    session.handle_download("foo-1.0-1.pkg.tar.zst", DownloadEvent::Init);
    session.end(&mut engine).unwrap();

    let events = drain(&mut rx);
    assert_eq!(
        notifications(&events),
        vec![
            (PackageInfo::Downloading, "foo".into()),
            (PackageInfo::Finished, "foo".into()),
        ]
    );
    let files: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            AppEvent::Package(PackageEvent::Files { package, paths }) => {
                Some((package.name.clone(), paths.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "foo");
    assert_eq!(
        files[0].1,
        vec![
            std::path::PathBuf::from("/var/cache/test/foo-1.0-1.pkg.tar.zst"),
            std::path::PathBuf::from("/var/cache/test/foo-1.0-1.pkg.tar.zst"),
        ]
    );
}

#[test]
fn switching_files_finalizes_the_previous_package_first() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let mut engine = MockEngine {
        adds: vec![artifact("foo", "1.0-1"), artifact("bar", "2.0-1")],
        ..MockEngine::default()
    };
    session.prepare(&mut engine).unwrap();

    session.handle_download("foo-1.0-1.pkg.tar.zst", DownloadEvent::Init);
    session.handle_download("bar-2.0-1.pkg.tar.zst", DownloadEvent::Init);

    let events = drain(&mut rx);
    assert_eq!(
        notifications(&events),
        vec![
            (PackageInfo::Downloading, "foo".into()),
            (PackageInfo::Finished, "foo".into()),
            (PackageInfo::Downloading, "bar".into()),
        ]
    );
    // not a download-only transaction, so no file list is collected
    assert!(!events
        .iter()
        .any(|event| matches!(event, AppEvent::Package(PackageEvent::Files { .. }))));
}

#[test]
fn untracked_files_set_status_but_are_not_notified() {
    let (mut session, mut rx) = test_session(Role::RefreshCache);

    session.handle_download("core.db", DownloadEvent::Init);

    let events = drain(&mut rx);
    assert_eq!(statuses(&events), vec![Status::Download]);
    assert!(notifications(&events).is_empty());
}

#[test]
fn known_grand_total_drives_overall_percentage() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    session.set_download_total(DownloadTotal::Known { bytes: 1000 });

    session.handle_download(
        "a.pkg",
        DownloadEvent::Progress {
            downloaded: 250,
            total: 500,
        },
    );
    session.handle_download(
        "a.pkg",
        DownloadEvent::Progress {
            downloaded: 500,
            total: 500,
        },
    );
    session.handle_download("a.pkg", DownloadEvent::Completed { total: 500 });
    session.handle_download(
        "b.pkg",
        DownloadEvent::Progress {
            downloaded: 250,
            total: 500,
        },
    );

    assert_eq!(percentages(&drain(&mut rx)), vec![25, 50, 75]);
}

#[test]
fn indeterminate_parts_advance_on_item_total_change_only() {
    let (mut session, mut rx) = test_session(Role::RefreshCache);
    session.set_download_total(DownloadTotal::IndeterminateParts { count: 3 });

    let progress = |downloaded, total| DownloadEvent::Progress { downloaded, total };
    session.handle_download("one.db", progress(50, 100));
    session.handle_download("one.db", progress(100, 100));
    session.handle_download("two.db", progress(10, 200));
    session.handle_download("three.db", progress(10, 300));
    session.handle_download("three.db", progress(20, 300));

    assert_eq!(percentages(&drain(&mut rx)), vec![16, 33, 34, 67, 68]);
}

// ---------------------------------------------------------------------------
// question policy

#[test]
fn install_ignored_is_allowed_and_explained_when_installing() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let pkg = Package::new("foo", "1.0-1");

    // opened by the engine for the package being processed
    session.handle_event(TransactionEvent::PackageOperationStart(
        PackageOperation::Install { new: pkg.clone() },
    ));
    let answer = session.answer_question(&Question::InstallIgnored {
        package: pkg.clone(),
    });
    session.handle_event(TransactionEvent::PackageOperationDone(
        PackageOperation::Install { new: pkg },
    ));

    assert_eq!(answer, QuestionAnswer::Install { install: true });
    let events = drain(&mut rx);
    let texts = messages(&events);
    assert_eq!(texts.len(), 1);
    let explanation_lines = texts[0]
        .1
        .lines()
        .filter(|line| *line == "foo: was not ignored")
        .count();
    assert_eq!(explanation_lines, 1);
}

#[test]
fn install_ignored_is_refused_for_queries() {
    let (mut session, mut rx) = test_session(Role::Search);

    let answer = session.answer_question(&Question::InstallIgnored {
        package: Package::new("foo", "1.0-1"),
    });

    assert_eq!(answer, QuestionAnswer::Install { install: false });
    assert!(messages(&drain(&mut rx)).is_empty());
}

#[test]
fn install_ignored_is_allowed_quietly_for_downloads() {
    let (mut session, _rx) = test_session(Role::DownloadPackages);

    let answer = session.answer_question(&Question::InstallIgnored {
        package: Package::new("foo", "1.0-1"),
    });

    assert_eq!(answer, QuestionAnswer::Install { install: true });
}

#[test]
fn destructive_questions_are_pre_approved() {
    let (mut session, _rx) = test_session(Role::UpdatePackages);

    assert_eq!(
        session.answer_question(&Question::Replace {
            old: Package::new("old", "1-1"),
            new: Package::new("new", "1-1"),
            repository: "core".into(),
        }),
        QuestionAnswer::Replace { replace: true }
    );
    assert_eq!(
        session.answer_question(&Question::Conflict {
            package: "a".into(),
            conflicting: "b".into(),
        }),
        QuestionAnswer::Remove { remove: true }
    );
    assert_eq!(
        session.answer_question(&Question::Corrupted {
            filename: "x.pkg".into(),
            reason: "bad signature".into(),
        }),
        QuestionAnswer::Remove { remove: true }
    );
    assert_eq!(
        session.answer_question(&Question::RemoveDependents {
            packages: vec![Package::new("dependent", "1-1")],
        }),
        QuestionAnswer::Skip { skip: false }
    );
}

#[test]
fn key_import_is_declined() {
    let (mut session, _rx) = test_session(Role::UpdatePackages);

    let answer = session.answer_question(&Question::ImportKey {
        fingerprint: "ABCD1234".into(),
        uid: "Packager <packager@example.org>".into(),
    });

    assert_eq!(answer, QuestionAnswer::Import { import: false });
}

#[test]
fn first_provider_is_selected_and_explained() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let pkg = Package::new("foo", "1.0-1");

    session.handle_event(TransactionEvent::PackageOperationStart(
        PackageOperation::Install { new: pkg.clone() },
    ));
    let answer = session.answer_question(&Question::SelectProvider {
        providers: vec![Package::new("provider-a", "1-1"), Package::new("provider-b", "1-1")],
        dependency: Dependency::new("virtual-dep"),
    });
    session.handle_event(TransactionEvent::PackageOperationDone(
        PackageOperation::Install { new: pkg },
    ));

    assert_eq!(answer, QuestionAnswer::UseIndex { index: 0 });
    let texts = messages(&drain(&mut rx));
    assert!(texts[0]
        .1
        .contains("provider package was selected (provider-a provides virtual-dep)"));
}

// ---------------------------------------------------------------------------
// lifecycle

#[test]
fn prepare_failure_builds_readable_diagnostics() {
    let (mut session, _rx) = test_session(Role::InstallPackages);
    let mut engine = MockEngine {
        prepare_error: Some(
            EngineFailure::new(EngineErrorKind::UnsatisfiedDeps, "could not satisfy dependencies")
                .with_payload(FailurePayload::MissingDeps {
                    misses: vec![DepMissing {
                        target: "bar".into(),
                        depend: Dependency::versioned("libfoo", DepModifier::Ge, "2"),
                        causing_package: None,
                    }],
                }),
        ),
        ..MockEngine::default()
    };

    let error = session.prepare(&mut engine).unwrap_err();
    assert!(matches!(error, SessionError::Prepare { .. }));
    assert_eq!(
        error.to_string(),
        "libfoo>=2 <- bar: could not satisfy dependencies"
    );
}

#[test]
fn commit_disallows_cancel_and_reports_running() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let mut engine = MockEngine::default();

    session.commit(&mut engine, &NoInhibit).unwrap();

    let events = drain(&mut rx);
    assert!(events.iter().any(|event| matches!(
        event,
        AppEvent::Job(JobEvent::AllowCancel { allow: false })
    )));
    assert_eq!(statuses(&events), vec![Status::Running]);
    assert!(engine.committed);
}

#[test]
fn cancelled_commit_is_a_silent_success() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let mut engine = MockEngine::default();

    session.cancel_token().cancel();
    session.commit(&mut engine, &NoInhibit).unwrap();

    assert!(!engine.committed);
    assert!(drain(&mut rx).is_empty());
}

struct CountingInhibitor {
    active: Arc<AtomicUsize>,
}

struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Inhibitor for CountingInhibitor {
    type Guard = ActiveGuard;

    fn inhibit(&self) -> ActiveGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        ActiveGuard(Arc::clone(&self.active))
    }
}

#[test]
fn inhibit_is_held_during_commit_and_released_on_failure() {
    let (mut session, _rx) = test_session(Role::UpdatePackages);
    let active = Arc::new(AtomicUsize::new(0));
    let seen_during_commit = Arc::new(AtomicUsize::new(usize::MAX));

    let active_in_script = Arc::clone(&active);
    let seen = Arc::clone(&seen_during_commit);
    let mut engine = MockEngine {
        commit_script: Some(Box::new(move |_observer| {
            seen.store(active_in_script.load(Ordering::SeqCst), Ordering::SeqCst);
        })),
        commit_error: Some(
            EngineFailure::new(EngineErrorKind::InvalidPackage, "invalid or corrupted package")
                .with_payload(FailurePayload::InvalidPackages {
                    packages: vec!["bad-1.0-1.pkg.tar.zst".into()],
                }),
        ),
        ..MockEngine::default()
    };

    let inhibitor = CountingInhibitor {
        active: Arc::clone(&active),
    };
    let error = session.commit(&mut engine, &inhibitor).unwrap_err();

    assert_eq!(seen_during_commit.load(Ordering::SeqCst), 1);
    assert_eq!(active.load(Ordering::SeqCst), 0);
    assert_eq!(
        error.to_string(),
        "bad-1.0-1.pkg.tar.zst: invalid or corrupted package"
    );
}

#[test]
fn commit_callbacks_flow_through_the_session() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let pkg = Package::new("foo", "1.0-1");
    let pkg_in_script = pkg.clone();
    let mut engine = MockEngine {
        adds: vec![pkg],
        commit_script: Some(Box::new(move |observer| {
            observer.handle_event(TransactionEvent::PackageOperationStart(
                PackageOperation::Install {
                    new: pkg_in_script.clone(),
                },
            ));
            observer.report_progress(ProgressKind::AddStart, "foo", 100, 1, 1);
            observer.handle_event(TransactionEvent::PackageOperationDone(
                PackageOperation::Install {
                    new: pkg_in_script.clone(),
                },
            ));
        })),
        ..MockEngine::default()
    };

    session.commit(&mut engine, &NoInhibit).unwrap();

    let events = drain(&mut rx);
    assert_eq!(
        statuses(&events),
        vec![Status::Running, Status::Install]
    );
    assert_eq!(percentages(&events), vec![100]);
    assert_eq!(
        notifications(&events),
        vec![
            (PackageInfo::Installing, "foo".into()),
            (PackageInfo::Finished, "foo".into()),
        ]
    );
}

#[test]
fn end_flushes_open_output_state() {
    let (mut session, mut rx) = test_session(Role::InstallPackages);
    let mut engine = MockEngine::default();

    session.handle_event(TransactionEvent::PackageOperationStart(
        PackageOperation::Install {
            new: Package::new("foo", "1.0-1"),
        },
    ));
    session.handle_event(TransactionEvent::ScriptletInfo {
        line: "interrupted mid-install\n".into(),
    });
    session.end(&mut engine).unwrap();

    let texts = messages(&drain(&mut rx));
    assert_eq!(texts.len(), 1);
    assert!(texts[0].1.contains("interrupted mid-install"));
    assert!(engine.released);
}

#[test]
fn emit_pending_previews_the_transaction() {
    let (mut session, mut rx) = test_session(Role::UpdatePackages);
    let engine = MockEngine {
        adds: vec![Package::new("present", "2.0-1"), Package::new("fresh", "1.0-1")],
        removals: vec![Package::new("obsolete", "0.9-1")],
        installed: vec![Package::new("present", "1.0-1")],
        ..MockEngine::default()
    };

    session.emit_pending(&engine);

    assert_eq!(
        notifications(&drain(&mut rx)),
        vec![
            (PackageInfo::Updating, "present".into()),
            (PackageInfo::Installing, "fresh".into()),
            (PackageInfo::Obsoleting, "obsolete".into()),
        ]
    );
}

#[test]
fn removal_preview_uses_removing_outside_updates() {
    let (mut session, mut rx) = test_session(Role::RemovePackages);
    let engine = MockEngine {
        removals: vec![Package::new("gone", "1.0-1")],
        ..MockEngine::default()
    };

    session.emit_pending(&engine);

    assert_eq!(
        notifications(&drain(&mut rx)),
        vec![(PackageInfo::Removing, "gone".into())]
    );
}

#[test]
#[should_panic(expected = "already active")]
fn two_sessions_on_one_worker_are_rejected() {
    let (tx, _rx) = channel();
    let _first = Session::begin(Role::InstallPackages, SessionConfig::default(), tx.clone());
    let _second = Session::begin(Role::Search, SessionConfig::default(), tx);
}

#[test]
fn a_finished_session_makes_room_for_the_next() {
    let (tx, _rx) = channel();
    let mut engine = MockEngine::default();

    let first = Session::begin(Role::InstallPackages, SessionConfig::default(), tx.clone());
    first.end(&mut engine).unwrap();

    let second = Session::begin(Role::Search, SessionConfig::default(), tx);
    assert_eq!(second.role(), Role::Search);
}
