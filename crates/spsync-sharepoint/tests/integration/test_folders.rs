//! Folder listings and folder management

use spsync_core::domain::{CheckOutState, RemotePath};
use spsync_core::ports::{IRemoteStore, RemoteStoreError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{self, alias, api, FOLDER_ENDPOINT};

const DOCS: &str = "/sites/team/Shared Documents";

#[tokio::test]
async fn test_list_child_files_keeps_listing_order() {
    let (server, store) = common::setup_sharepoint_mock().await;
    common::mount_files_listing(
        &server,
        DOCS,
        &[
            "/sites/team/Shared Documents/zeta.txt",
            "/sites/team/Shared Documents/alpha.txt",
        ],
    )
    .await;

    let files = store.list_child_files(&RemotePath::new(DOCS)).await.unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["zeta.txt", "alpha.txt"]);
    assert!(files.iter().all(|f| f.checkout == CheckOutState::Free));
}

#[tokio::test]
async fn test_list_child_folders() {
    let (server, store) = common::setup_sharepoint_mock().await;
    common::mount_folders_listing(
        &server,
        DOCS,
        &[
            "/sites/team/Shared Documents/Forms",
            "/sites/team/Shared Documents/Reports",
        ],
    )
    .await;

    let folders = store
        .list_child_folders(&RemotePath::new(DOCS))
        .await
        .unwrap();

    let paths: Vec<&str> = folders.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/sites/team/Shared Documents/Forms",
            "/sites/team/Shared Documents/Reports",
        ]
    );
}

#[tokio::test]
async fn test_list_empty_folder() {
    let (server, store) = common::setup_sharepoint_mock().await;
    common::mount_files_listing(&server, DOCS, &[]).await;

    let files = store.list_child_files(&RemotePath::new(DOCS)).await.unwrap();

    assert!(files.is_empty());
}

#[tokio::test]
async fn test_list_missing_folder_is_not_found() {
    let (server, store) = common::setup_sharepoint_mock().await;
    Mock::given(method("GET"))
        .and(path(api(&format!("{FOLDER_ENDPOINT}/Files"))))
        .respond_with(ResponseTemplate::new(404).set_body_json(common::not_found_body()))
        .mount(&server)
        .await;

    let err = store
        .list_child_files(&RemotePath::new("/sites/team/missing"))
        .await
        .unwrap_err();

    assert_eq!(err, RemoteStoreError::NotFound("File Not Found.".into()));
}

#[tokio::test]
async fn test_create_folder_posts_leaf_name() {
    let (server, store) = common::setup_sharepoint_mock().await;
    Mock::given(method("POST"))
        .and(path(api(&format!(
            "{FOLDER_ENDPOINT}/Folders/AddUsingPath(decodedurl=@f)"
        ))))
        .and(query_param("@p", alias(DOCS)))
        .and(query_param("@f", alias("Q3 Reports")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    store
        .create_folder(&RemotePath::new(DOCS), "Q3 Reports")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_folder_exists_probe() {
    let (server, store) = common::setup_sharepoint_mock().await;
    common::mount_folder_exists(&server, DOCS, true).await;
    common::mount_folder_exists(&server, "/sites/team/Nope", false).await;

    assert!(store.folder_exists(&RemotePath::new(DOCS)).await);
    assert!(!store.folder_exists(&RemotePath::new("/sites/team/Nope")).await);
    // Unmounted paths answer 404, which counts as absent
    assert!(!store.folder_exists(&RemotePath::new("/sites/team/Other")).await);
}

#[tokio::test]
async fn test_delete_and_move_folder_use_folder_endpoint() {
    let (server, store) = common::setup_sharepoint_mock().await;
    let reports = "/sites/team/Shared Documents/Reports";
    let archived = "/sites/team/Archive/Reports";
    common::mount_folder_exists(&server, reports, true).await;
    Mock::given(method("POST"))
        .and(path(api(&format!("{FOLDER_ENDPOINT}/MoveTo(newurl=@d)"))))
        .and(query_param("@p", alias(reports)))
        .and(query_param("@d", alias(archived)))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api(FOLDER_ENDPOINT)))
        .and(query_param("@p", alias(reports)))
        .and(header("if-match", "*"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let reports = RemotePath::new(reports);
    store
        .move_item(&reports, &RemotePath::new(archived), false)
        .await
        .unwrap();
    store.delete_item(&reports).await.unwrap();
}
