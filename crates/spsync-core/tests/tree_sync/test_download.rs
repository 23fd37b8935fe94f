//! Folder download tests

use std::time::Duration;

use spsync_core::domain::{FailureKind, LocalPath, RemotePath};
use spsync_core::ports::RemoteStoreError;
use spsync_core::usecases::TreeSyncUseCase;
use tempfile::TempDir;

use crate::common::{read_local_tree, write_local_tree, MemoryStore, Op};

const TIMEOUT: Duration = Duration::from_secs(5);

/// `/site/docs/f` holding `a.txt`, `b.txt` and subfolder `c` with `d.txt`
fn seeded_store() -> std::sync::Arc<MemoryStore> {
    let store = MemoryStore::with_folders(&["/site", "/site/docs", "/site/docs/f", "/site/docs/f/c"]);
    store.add_file("/site/docs/f/a.txt", b"alpha");
    store.add_file("/site/docs/f/b.txt", b"bravo");
    store.add_file("/site/docs/f/c/d.txt", b"delta");
    store
}

#[tokio::test]
async fn test_download_creates_local_tree() {
    let store = seeded_store();
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("deep").join("out");
    let local = LocalPath::from(target.as_path());

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(&RemotePath::new("/site/docs/f"), &local, TIMEOUT)
        .await;

    assert_eq!(
        outcome.success_message(),
        Some(format!("Downloaded the folder from /site/docs/f to {local}").as_str())
    );
    assert_eq!(
        read_local_tree(&target),
        vec![
            ("a.txt".to_string(), b"alpha".to_vec()),
            ("b.txt".to_string(), b"bravo".to_vec()),
            ("c/d.txt".to_string(), b"delta".to_vec()),
        ]
    );
}

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let source = TempDir::new().unwrap();
    let files: &[(&str, &[u8])] = &[
        ("readme.md", b"# hello"),
        ("empty.bin", b""),
        ("nested/deeper/data.bin", &[0u8, 159, 146, 150, 255]),
        ("nested/notes.txt", b"line one\nline two\n"),
    ];
    write_local_tree(source.path(), files);
    let store = MemoryStore::with_folders(&["/site"]);
    let engine = TreeSyncUseCase::new(store.clone());
    let remote = RemotePath::new("/site/roundtrip");

    assert!(engine
        .upload_folder(&LocalPath::from(source.path()), &remote, TIMEOUT)
        .await
        .is_success());

    let fresh = TempDir::new().unwrap();
    assert!(engine
        .download_folder(&remote, &LocalPath::from(fresh.path()), TIMEOUT)
        .await
        .is_success());

    assert_eq!(read_local_tree(fresh.path()), read_local_tree(source.path()));
}

#[tokio::test]
async fn test_download_overwrites_but_keeps_extraneous_local_files() {
    let store = seeded_store();
    let dir = TempDir::new().unwrap();
    write_local_tree(
        dir.path(),
        &[("a.txt", b"stale"), ("local-only.txt", b"mine")],
    );

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(
            &RemotePath::new("/site/docs/f"),
            &LocalPath::from(dir.path()),
            TIMEOUT,
        )
        .await;

    assert!(outcome.is_success());
    assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"alpha");
    assert_eq!(
        std::fs::read(dir.path().join("local-only.txt")).unwrap(),
        b"mine"
    );
}

#[tokio::test]
async fn test_download_file_failure_precedes_subfolder_failure() {
    let store = seeded_store();
    store.fail(
        Op::Download,
        "/site/docs/f/b.txt",
        RemoteStoreError::Rejected("b is corrupt".into()),
    );
    store.fail(
        Op::ListFiles,
        "/site/docs/f/c",
        RemoteStoreError::Rejected("c is unavailable".into()),
    );
    let dir = TempDir::new().unwrap();

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(
            &RemotePath::new("/site/docs/f"),
            &LocalPath::from(dir.path()),
            TIMEOUT,
        )
        .await;

    let messages: Vec<&str> = outcome.failures().iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Fail to download the file with error: b is corrupt",
            "Failed to download the folder with error: c is unavailable",
        ]
    );
    // siblings of a failing item are still visited
    assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"alpha");
}

#[tokio::test]
async fn test_download_subfolder_listing_failure_is_reported_after_files() {
    let store = seeded_store();
    store.fail(
        Op::ListFolders,
        "/site/docs/f",
        RemoteStoreError::Transport("connection reset".into()),
    );
    let dir = TempDir::new().unwrap();

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(
            &RemotePath::new("/site/docs/f"),
            &LocalPath::from(dir.path()),
            TIMEOUT,
        )
        .await;

    assert_eq!(
        outcome.to_legacy_string(),
        "FAIL:Failed to download the folder with error: connection reset"
    );
    assert_eq!(outcome.failures()[0].kind, FailureKind::Unknown);
    assert!(dir.path().join("b.txt").exists());
    assert!(!dir.path().join("c").exists());
}

#[tokio::test]
async fn test_download_missing_folder_reports_not_found() {
    let store = seeded_store();
    let dir = TempDir::new().unwrap();

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(
            &RemotePath::new("/site/docs/nope"),
            &LocalPath::from(dir.path()),
            TIMEOUT,
        )
        .await;

    assert_eq!(
        outcome.to_legacy_string(),
        "FAIL:Failed to download the folder with error: File Not Found."
    );
    assert_eq!(outcome.failures()[0].kind, FailureKind::NotFound);
}

#[tokio::test]
async fn test_download_file_path_reports_wrong_kind() {
    let store = seeded_store();
    let dir = TempDir::new().unwrap();

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(
            &RemotePath::new("/site/docs/f/a.txt"),
            &LocalPath::from(dir.path()),
            TIMEOUT,
        )
        .await;

    assert_eq!(outcome.failures().len(), 1);
    assert_eq!(outcome.failures()[0].kind, FailureKind::WrongKind);
}

#[tokio::test]
async fn test_download_timeout_bounds_each_call() {
    let store = seeded_store();
    store.fail(
        Op::StallDownload,
        "/site/docs/f/a.txt",
        RemoteStoreError::Rejected(String::new()),
    );
    let dir = TempDir::new().unwrap();

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(
            &RemotePath::new("/site/docs/f"),
            &LocalPath::from(dir.path()),
            Duration::from_millis(200),
        )
        .await;

    assert_eq!(outcome.failures().len(), 1);
    assert!(outcome.failures()[0]
        .message
        .starts_with("Fail to download the file with error: The operation has timed out"));
    assert!(!dir.path().join("a.txt").exists());
    assert_eq!(std::fs::read(dir.path().join("b.txt")).unwrap(), b"bravo");
    assert_eq!(std::fs::read(dir.path().join("c/d.txt")).unwrap(), b"delta");
}

#[tokio::test]
async fn test_download_requires_session() {
    let store = seeded_store();
    store.set_authenticated(false);
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out");

    let outcome = TreeSyncUseCase::new(store.clone())
        .download_folder(
            &RemotePath::new("/site/docs/f"),
            &LocalPath::from(target.as_path()),
            TIMEOUT,
        )
        .await;

    assert_eq!(outcome.to_legacy_string(), "FAIL:Authentication is needed.");
    assert!(!target.exists());
    assert!(store.calls().is_empty());
}
