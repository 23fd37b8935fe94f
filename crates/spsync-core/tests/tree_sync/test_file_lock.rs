//! Checkout / checkin / undo-checkout tests

use spsync_core::domain::{CheckOutState, FailureKind, RemotePath};
use spsync_core::ports::RemoteStoreError;
use spsync_core::usecases::{FileLockUseCase, LockState};

use crate::common::{MemoryStore, Op};

const DOC: &str = "/site/docs/report.docx";

fn seeded_store() -> std::sync::Arc<MemoryStore> {
    let store = MemoryStore::with_folders(&["/site", "/site/docs"]);
    store.add_file(DOC, b"draft");
    store
}

#[tokio::test]
async fn test_check_out_twice_reports_same_success() {
    let store = seeded_store();
    let lock = FileLockUseCase::new(store.clone());
    let path = RemotePath::new(DOC);

    let first = lock.check_out(&path).await;
    let second = lock.check_out(&path).await;

    assert_eq!(
        first.success_message(),
        Some("Checkout the file located on /site/docs/report.docx")
    );
    assert_eq!(first, second);
    assert_eq!(store.count_calls("check_out"), 1);
    assert_eq!(lock.state(&path).await, Ok(LockState::CheckedOut));
}

#[tokio::test]
async fn test_check_in_without_checkout_is_a_no_op() {
    let store = seeded_store();
    let lock = FileLockUseCase::new(store.clone());

    let outcome = lock.check_in(&RemotePath::new(DOC), "nothing").await;

    assert_eq!(
        outcome.success_message(),
        Some("Checkin the file located on /site/docs/report.docx")
    );
    assert_eq!(store.count_calls("check_in"), 0);
}

#[tokio::test]
async fn test_check_in_passes_comment_and_releases_lock() {
    let store = seeded_store();
    let lock = FileLockUseCase::new(store.clone());
    let path = RemotePath::new(DOC);

    assert!(lock.check_out(&path).await.is_success());
    assert!(lock.check_in(&path, "final review").await.is_success());

    assert!(store
        .calls()
        .contains(&format!("check_in {DOC} \"final review\"")));
    assert_eq!(store.checkout(DOC), Some(CheckOutState::Free));
    assert_eq!(lock.state(&path).await, Ok(LockState::Free));
}

#[tokio::test]
async fn test_check_in_accepts_empty_comment() {
    let store = seeded_store();
    store.set_checkout(DOC, CheckOutState::CheckedOutBySelf);

    let outcome = FileLockUseCase::new(store.clone())
        .check_in(&RemotePath::new(DOC), "")
        .await;

    assert!(outcome.is_success());
    assert!(store.calls().contains(&format!("check_in {DOC} \"\"")));
}

#[tokio::test]
async fn test_undo_check_out() {
    let store = seeded_store();
    let lock = FileLockUseCase::new(store.clone());
    let path = RemotePath::new(DOC);

    let idle = lock.undo_check_out(&path).await;
    assert!(idle.is_success());
    assert_eq!(store.count_calls("undo_check_out"), 0);

    lock.check_out(&path).await;
    let outcome = lock.undo_check_out(&path).await;
    assert_eq!(
        outcome.success_message(),
        Some("Undo Checkout the File located on /site/docs/report.docx")
    );
    assert_eq!(store.count_calls("undo_check_out"), 1);
    assert_eq!(store.checkout(DOC), Some(CheckOutState::Free));
}

#[tokio::test]
async fn test_file_checked_out_by_someone_else_counts_as_checked_out() {
    let store = seeded_store();
    store.set_checkout(DOC, CheckOutState::CheckedOutByOther(Some("bob".into())));
    let lock = FileLockUseCase::new(store.clone());

    assert!(lock.check_out(&RemotePath::new(DOC)).await.is_success());
    assert_eq!(store.count_calls("check_out"), 0);
    assert_eq!(
        lock.state(&RemotePath::new(DOC)).await,
        Ok(LockState::CheckedOut)
    );
}

#[tokio::test]
async fn test_lock_operations_on_folder_fail_with_wrong_kind() {
    let store = seeded_store();
    let lock = FileLockUseCase::new(store.clone());

    let outcome = lock.check_out(&RemotePath::new("/site/docs")).await;

    assert_eq!(outcome.failures()[0].kind, FailureKind::WrongKind);
    assert!(outcome
        .to_legacy_string()
        .starts_with("FAIL:Fail to checkout the file with error:"));
    assert_eq!(store.count_calls("check_out"), 0);
}

#[tokio::test]
async fn test_lock_operations_on_missing_file_fail() {
    let store = seeded_store();
    let lock = FileLockUseCase::new(store.clone());
    let missing = RemotePath::new("/site/docs/missing.docx");

    for outcome in [
        lock.check_out(&missing).await,
        lock.check_in(&missing, "").await,
        lock.undo_check_out(&missing).await,
    ] {
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].kind, FailureKind::NotFound);
    }
}

#[tokio::test]
async fn test_failed_check_out_leaves_state_unchanged() {
    let store = seeded_store();
    store.fail(
        Op::CheckOut,
        DOC,
        RemoteStoreError::Transport("connection reset".into()),
    );
    let lock = FileLockUseCase::new(store.clone());

    let outcome = lock.check_out(&RemotePath::new(DOC)).await;

    assert_eq!(
        outcome.to_legacy_string(),
        "FAIL:Fail to checkout the file with error: connection reset"
    );
    assert_eq!(store.checkout(DOC), Some(CheckOutState::Free));
}

#[tokio::test]
async fn test_lock_requires_session() {
    let store = seeded_store();
    store.set_authenticated(false);
    let lock = FileLockUseCase::new(store.clone());
    let path = RemotePath::new(DOC);

    assert_eq!(
        lock.check_out(&path).await.to_legacy_string(),
        "FAIL:Authentication is needed."
    );
    assert_eq!(
        lock.state(&path).await.unwrap_err().kind,
        FailureKind::Unauthenticated
    );
    assert!(store.calls().is_empty());
}
