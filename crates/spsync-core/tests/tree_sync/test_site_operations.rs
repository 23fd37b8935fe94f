//! One-shot site operation tests

use spsync_core::domain::{FailureKind, LocalPath, RemotePath};
use spsync_core::usecases::SiteOperationsUseCase;
use tempfile::TempDir;

use crate::common::MemoryStore;

fn seeded_store() -> std::sync::Arc<MemoryStore> {
    let store = MemoryStore::with_folders(&["/site", "/site/docs", "/site/docs/old", "/site/archive"]);
    store.add_file("/site/docs/a.txt", b"alpha");
    store.add_file("/site/docs/old/b.txt", b"bravo");
    store
}

#[tokio::test]
async fn test_site_title() {
    let ops = SiteOperationsUseCase::new(seeded_store());
    assert_eq!(ops.site_title().await, Ok("Team Site".to_string()));
}

#[tokio::test]
async fn test_single_file_transfer_messages() {
    let store = seeded_store();
    let ops = SiteOperationsUseCase::new(store.clone());
    let dir = TempDir::new().unwrap();
    let local = LocalPath::from(dir.path().join("a.txt").as_path());

    let down = ops
        .download_file(&RemotePath::new("/site/docs/a.txt"), &local)
        .await;
    assert_eq!(
        down.success_message(),
        Some(format!("File Downloaded from /site/docs/a.txt to {local}").as_str())
    );

    let up = ops
        .upload_file(&local, &RemotePath::new("/site/archive/a.txt"))
        .await;
    assert_eq!(
        up.success_message(),
        Some(format!("File uploaded from {local} to /site/archive/a.txt").as_str())
    );
    assert_eq!(store.file_data("/site/archive/a.txt"), Some(b"alpha".to_vec()));
}

#[tokio::test]
async fn test_upload_missing_local_file_fails_with_not_found() {
    let ops = SiteOperationsUseCase::new(seeded_store());
    let dir = TempDir::new().unwrap();

    let outcome = ops
        .upload_file(
            &LocalPath::from(dir.path().join("nope.txt").as_path()),
            &RemotePath::new("/site/docs/nope.txt"),
        )
        .await;

    assert_eq!(outcome.failures()[0].kind, FailureKind::NotFound);
    assert!(outcome
        .to_legacy_string()
        .starts_with("FAIL:Fail to upload the file with error:"));
}

#[tokio::test]
async fn test_copy_and_move_file() {
    let store = seeded_store();
    let ops = SiteOperationsUseCase::new(store.clone());

    let copied = ops
        .copy_file(
            &RemotePath::new("/site/docs/a.txt"),
            &RemotePath::new("/site/archive/a.txt"),
        )
        .await;
    assert_eq!(
        copied.success_message(),
        Some("Copied the file from /site/docs/a.txt to /site/archive/a.txt")
    );

    let moved = ops
        .move_file(
            &RemotePath::new("/site/docs/a.txt"),
            &RemotePath::new("/site/archive/a.txt"),
        )
        .await;
    assert_eq!(
        moved.success_message(),
        Some("Moved the file from /site/docs/a.txt to /site/archive/a.txt")
    );
    assert!(store.file_data("/site/docs/a.txt").is_none());
    assert_eq!(store.file_data("/site/archive/a.txt"), Some(b"alpha".to_vec()));
}

#[tokio::test]
async fn test_file_operations_reject_folders() {
    let store = seeded_store();
    let ops = SiteOperationsUseCase::new(store.clone());

    let outcome = ops.delete_file(&RemotePath::new("/site/docs/old")).await;

    assert_eq!(outcome.failures()[0].kind, FailureKind::WrongKind);
    assert!(store.has_folder("/site/docs/old"));
    assert_eq!(store.count_calls("delete_item"), 0);
}

#[tokio::test]
async fn test_delete_file() {
    let store = seeded_store();
    let ops = SiteOperationsUseCase::new(store.clone());

    let outcome = ops.delete_file(&RemotePath::new("/site/docs/a.txt")).await;

    assert_eq!(
        outcome.success_message(),
        Some("Deleted the file located on /site/docs/a.txt")
    );
    assert!(store.file_data("/site/docs/a.txt").is_none());
}

#[tokio::test]
async fn test_folder_lifecycle() {
    let store = seeded_store();
    let ops = SiteOperationsUseCase::new(store.clone());

    let created = ops
        .create_folder(&RemotePath::new("/site/docs/"), "new")
        .await;
    assert_eq!(
        created.success_message(),
        Some("Create the folder located in /site/docs/new")
    );
    assert!(store.has_folder("/site/docs/new"));

    let moved = ops
        .move_folder(
            &RemotePath::new("/site/docs/old"),
            &RemotePath::new("/site/archive/old"),
        )
        .await;
    assert_eq!(
        moved.success_message(),
        Some("Moved the folder from /site/docs/old to /site/archive/old")
    );
    assert_eq!(
        store.file_data("/site/archive/old/b.txt"),
        Some(b"bravo".to_vec())
    );

    let deleted = ops.delete_folder(&RemotePath::new("/site/archive/old")).await;
    assert_eq!(
        deleted.success_message(),
        Some("Deleted the folder located on /site/archive/old")
    );
    assert!(!store.has_folder("/site/archive/old"));
    assert!(store.file_data("/site/archive/old/b.txt").is_none());
}

#[tokio::test]
async fn test_folder_operations_classify_bad_targets() {
    let store = seeded_store();
    let ops = SiteOperationsUseCase::new(store.clone());

    let on_file = ops.delete_folder(&RemotePath::new("/site/docs/a.txt")).await;
    assert_eq!(on_file.failures()[0].kind, FailureKind::WrongKind);

    let missing = ops
        .move_folder(
            &RemotePath::new("/site/docs/missing"),
            &RemotePath::new("/site/archive/missing"),
        )
        .await;
    assert_eq!(missing.failures()[0].kind, FailureKind::NotFound);
    assert_eq!(store.count_calls("move_item"), 0);
}

#[tokio::test]
async fn test_list_items_returns_folders_then_files() {
    let ops = SiteOperationsUseCase::new(seeded_store());

    let items = ops.list_items(&RemotePath::new("/site/docs")).await.unwrap();

    assert_eq!(
        items,
        vec![
            RemotePath::new("/site/docs/old"),
            RemotePath::new("/site/docs/a.txt"),
        ]
    );
}

#[tokio::test]
async fn test_list_missing_folder_fails() {
    let ops = SiteOperationsUseCase::new(seeded_store());

    let err = ops
        .list_files(&RemotePath::new("/site/nowhere"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::NotFound);
    assert_eq!(
        err.message,
        "Failed to get a list of files in specified folder with error: File Not Found."
    );
}

#[tokio::test]
async fn test_site_operations_require_session() {
    let store = seeded_store();
    store.set_authenticated(false);
    let ops = SiteOperationsUseCase::new(store.clone());

    assert_eq!(
        ops.site_title().await.unwrap_err().kind,
        FailureKind::Unauthenticated
    );
    assert_eq!(
        ops.delete_file(&RemotePath::new("/site/docs/a.txt"))
            .await
            .to_legacy_string(),
        "FAIL:Authentication is needed."
    );
    assert!(ops.list_items(&RemotePath::new("/site")).await.is_err());
    assert!(store.calls().is_empty());
}
