//! Folder download end to end over the REST adapter

use std::sync::Arc;
use std::time::Duration;

use spsync_core::domain::{FailureKind, LocalPath, RemotePath};
use spsync_core::usecases::TreeSyncUseCase;
use tempfile::TempDir;

use crate::common;

const TIMEOUT: Duration = Duration::from_secs(10);
const ROOT: &str = "/sites/team/Shared Documents/Project";

#[tokio::test]
async fn test_download_folder_over_rest() {
    let (server, store) = common::setup_sharepoint_mock().await;
    let plan = format!("{ROOT}/plan.txt");
    let specs = format!("{ROOT}/Specs");
    let api_doc = format!("{specs}/api.md");

    common::mount_files_listing(&server, ROOT, &[plan.as_str()]).await;
    common::mount_folders_listing(&server, ROOT, &[specs.as_str()]).await;
    common::mount_files_listing(&server, &specs, &[api_doc.as_str()]).await;
    common::mount_folders_listing(&server, &specs, &[]).await;
    common::mount_download(&server, &plan, b"ship it").await;
    common::mount_download(&server, &api_doc, b"# API").await;

    let dir = TempDir::new().unwrap();
    let local = LocalPath::from(dir.path());

    let outcome = TreeSyncUseCase::new(Arc::new(store))
        .download_folder(&RemotePath::new(ROOT), &local, TIMEOUT)
        .await;

    assert!(outcome.is_success(), "{}", outcome.to_legacy_string());
    assert_eq!(
        std::fs::read(dir.path().join("plan.txt")).unwrap(),
        b"ship it"
    );
    assert_eq!(
        std::fs::read(dir.path().join("Specs").join("api.md")).unwrap(),
        b"# API"
    );
}

#[tokio::test]
async fn test_download_missing_folder_reports_not_found() {
    let (_server, store) = common::setup_sharepoint_mock().await;
    let dir = TempDir::new().unwrap();
    let local = LocalPath::from(dir.path().join("out").as_path());

    let outcome = TreeSyncUseCase::new(Arc::new(store))
        .download_folder(&RemotePath::new(ROOT), &local, TIMEOUT)
        .await;

    assert!(outcome.is_failure());
    assert_eq!(outcome.failures().len(), 1);
    assert_eq!(outcome.failures()[0].kind, FailureKind::NotFound);
}
