use super::*;
use crate::services::jobs::JobLocks;
use crate::test_utils::{init_test_logging, write_zip, CaptureEmitter};
use crate::types::errors::CoreError;
use crate::types::events::NullEmitter;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn full_run_writes_the_deduplicated_reference_file() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let zip1 = dir.path().join("one.zip");
    let zip2 = dir.path().join("two.zip");
    write_zip(&zip1, &[("doc.txt", "d"), ("img.jpg", "i")]);
    write_zip(&zip2, &[("doc.txt", "d"), ("sub/notes.txt", "n")]);

    let lock = OperationLock::new();
    let emitter = CaptureEmitter::default();
    let outcome = run_build(&lock, &emitter, &[zip1, zip2], dir.path())
        .await
        .unwrap();

    assert_eq!(outcome.unique_files, 3);
    assert_eq!(outcome.output_path, dir.path().join(REFERENCE_FILE_NAME));
    assert_eq!(
        fs::read_to_string(&outcome.output_path).unwrap(),
        "doc.txt\nimg.jpg\nnotes.txt\n"
    );

    let progress = emitter.progress.lock().unwrap();
    let last = progress.last().unwrap();
    assert_eq!(last.fraction, 1.0);
    assert!(!last.active);
}

#[tokio::test]
async fn corrupt_archive_is_reported_but_not_fatal() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.zip");
    let bad = dir.path().join("bad.zip");
    write_zip(&good, &[("a.txt", "a")]);
    fs::write(&bad, "definitely not a zip").unwrap();

    let lock = OperationLock::new();
    let emitter = CaptureEmitter::default();
    let outcome = run_build(&lock, &emitter, &[good, bad], dir.path())
        .await
        .unwrap();

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.unique_files, 1);
    assert!(dir.path().join(REFERENCE_FILE_NAME).is_file());
    assert!(!emitter
        .messages_at(crate::types::events::LogLevel::Error)
        .is_empty());
}

#[tokio::test]
async fn no_archives_is_a_precondition_error() {
    let dir = TempDir::new().unwrap();
    let lock = OperationLock::new();

    let err = run_build(&lock, &NullEmitter, &[], dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Precondition(_)));
    assert!(!dir.path().join(REFERENCE_FILE_NAME).exists());
}

#[tokio::test]
async fn missing_archive_path_is_a_precondition_error() {
    let dir = TempDir::new().unwrap();
    let lock = OperationLock::new();

    let err = run_build(
        &lock,
        &NullEmitter,
        &[dir.path().join("ghost.zip")],
        dir.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CoreError::Precondition(_)));
}

#[tokio::test]
async fn missing_output_directory_is_a_precondition_error() {
    let dir = TempDir::new().unwrap();
    let zip1 = dir.path().join("one.zip");
    write_zip(&zip1, &[("a.txt", "a")]);
    let lock = OperationLock::new();

    let err = run_build(
        &lock,
        &NullEmitter,
        &[zip1],
        &dir.path().join("no_such_dir"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CoreError::Precondition(_)));
}

#[tokio::test]
async fn second_run_is_rejected_while_first_holds_the_lock() {
    let dir = TempDir::new().unwrap();
    let zip1 = dir.path().join("one.zip");
    write_zip(&zip1, &[("a.txt", "a")]);
    let lock = OperationLock::new();
    let _held = lock.try_acquire().unwrap();

    let err = run_build(&lock, &NullEmitter, &[zip1], dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Busy(_)));
}

#[tokio::test]
async fn build_and_copy_locks_are_independent() {
    let dir = TempDir::new().unwrap();
    let zip1 = dir.path().join("one.zip");
    write_zip(&zip1, &[("a.txt", "a")]);

    let locks = JobLocks::default();
    let _copy_running = locks.copy.try_acquire().unwrap();

    let outcome = run_build(&locks.build, &NullEmitter, &[zip1], dir.path()).await;
    assert!(outcome.is_ok(), "a build may run while a copy is active");
}
