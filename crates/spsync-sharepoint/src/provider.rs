//! SharePointRemoteStore - IRemoteStore implementation for the SharePoint REST API
//!
//! Maps each port operation onto one (occasionally two) REST calls against
//! the site the [`SharePointClient`] is bound to.
//!
//! ## Design Notes
//!
//! - Files are addressed with `GetFileByServerRelativePath`, folders with
//!   `GetFolderByServerRelativePath`; the path is passed as the `@p`
//!   parameter alias.
//! - A 404 on a file lookup is followed by a folder probe so a folder path
//!   is reported as a wrong-kind error rather than "not found".
//! - Checkout ownership is resolved against the current user id, fetched
//!   once per store and cached.

use async_trait::async_trait;
use reqwest::header::IF_MATCH;
use reqwest::{Method, RequestBuilder};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use spsync_core::domain::{CheckOutState, FileItem, FolderItem, ItemKind, RemotePath};
use spsync_core::ports::{IRemoteStore, RemoteStoreError, StoreResult};

use crate::client::SharePointClient;
use crate::odata::{string_literal, Collection, ExistsFlag, FileEntry, FolderEntry, UserRef};
use crate::SharePointError;

/// Properties selected for every file lookup or listing
const FILE_SELECT: &str = "Name,ServerRelativeUrl,CheckOutType,CheckedOutByUser/Id,CheckedOutByUser/Title";
const FILE_EXPAND: &str = "CheckedOutByUser";
const FOLDER_SELECT: &str = "Name,ServerRelativeUrl";

fn file_endpoint(suffix: &str) -> String {
    format!("/web/GetFileByServerRelativePath(decodedurl=@p){suffix}")
}

fn folder_endpoint(suffix: &str) -> String {
    format!("/web/GetFolderByServerRelativePath(decodedurl=@p){suffix}")
}

/// Remote store backed by a SharePoint site
pub struct SharePointRemoteStore {
    client: SharePointClient,
    current_user: OnceCell<i64>,
}

impl SharePointRemoteStore {
    /// Creates a new SharePointRemoteStore wrapping the given client
    pub fn new(client: SharePointClient) -> Self {
        Self {
            client,
            current_user: OnceCell::new(),
        }
    }

    /// The underlying client
    pub fn client(&self) -> &SharePointClient {
        &self.client
    }

    /// Request against `endpoint` with `@p` bound to `path`
    fn at(&self, method: Method, endpoint: &str, path: &RemotePath) -> RequestBuilder {
        self.client
            .request(method, endpoint)
            .query(&[("@p", string_literal(path.as_str()))])
    }

    /// POST with an empty body, as SharePoint expects for service operations
    fn post(&self, endpoint: &str, path: &RemotePath) -> RequestBuilder {
        self.at(Method::POST, endpoint, path).body(Vec::new())
    }

    async fn current_user_id(&self) -> Result<i64, SharePointError> {
        self.current_user
            .get_or_try_init(|| async {
                let user: UserRef = self
                    .client
                    .get_json(
                        self.client
                            .request(Method::GET, "/web/currentuser")
                            .query(&[("$select", "Id")]),
                    )
                    .await?;
                debug!(user_id = user.id, "Resolved current user");
                Ok::<_, SharePointError>(user.id)
            })
            .await
            .copied()
    }

    /// Turns a file payload into a [`FileItem`], resolving lock ownership
    async fn file_item(&self, entry: FileEntry) -> Result<FileItem, SharePointError> {
        let checked_out = entry.is_checked_out();
        let checkout = match entry.checked_out_by_user {
            _ if !checked_out => CheckOutState::Free,
            Some(user) => {
                if user.id == self.current_user_id().await? {
                    CheckOutState::CheckedOutBySelf
                } else {
                    CheckOutState::CheckedOutByOther(user.title)
                }
            }
            None => CheckOutState::CheckedOutByOther(None),
        };
        Ok(FileItem::new(RemotePath::new(entry.server_relative_url)).with_checkout(checkout))
    }

    async fn file_exists(&self, path: &RemotePath) -> bool {
        let request = self
            .at(Method::GET, &file_endpoint(""), path)
            .query(&[("$select", "Exists")]);
        match self.client.get_json::<ExistsFlag>(request).await {
            Ok(flag) => flag.exists,
            Err(e) => {
                debug!(path = %path, error = %e, "File probe failed");
                false
            }
        }
    }

    /// Endpoint addressing `path` as a folder if it is one, else as a file
    async fn item_endpoint(&self, path: &RemotePath, suffix: &str) -> String {
        if self.folder_exists(path).await {
            folder_endpoint(suffix)
        } else {
            file_endpoint(suffix)
        }
    }
}

fn split(path: &RemotePath) -> StoreResult<(RemotePath, &str)> {
    path.split_parent()
        .map_err(|e| RemoteStoreError::MalformedPath(e.to_string()))
}

#[async_trait]
impl IRemoteStore for SharePointRemoteStore {
    fn is_authenticated(&self) -> bool {
        !self.client.access_token().is_empty()
    }

    async fn site_title(&self) -> StoreResult<String> {
        Ok(self.client.get_site_title().await?)
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn get_file(&self, path: &RemotePath) -> StoreResult<FileItem> {
        let request = self
            .at(Method::GET, &file_endpoint(""), path)
            .query(&[("$select", FILE_SELECT), ("$expand", FILE_EXPAND)]);

        match self.client.get_json::<FileEntry>(request).await {
            Ok(entry) => Ok(self.file_item(entry).await?),
            Err(SharePointError::NotFound(message)) => {
                if self.folder_exists(path).await {
                    Err(RemoteStoreError::WrongKind {
                        path: path.clone(),
                        expected: ItemKind::File,
                    })
                } else {
                    Err(RemoteStoreError::NotFound(message))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn get_file_bytes(&self, path: &RemotePath) -> StoreResult<Vec<u8>> {
        let data = self
            .client
            .get_bytes(self.at(Method::GET, &file_endpoint("/$value"), path))
            .await?;
        debug!(bytes = data.len(), "Downloaded file content");
        Ok(data)
    }

    #[instrument(skip_all, fields(path = %path, bytes = data.len()))]
    async fn put_file_bytes(
        &self,
        path: &RemotePath,
        data: &[u8],
        overwrite: bool,
    ) -> StoreResult<()> {
        let (parent, name) = split(path)?;
        let endpoint = folder_endpoint(&format!(
            "/Files/AddUsingPath(decodedurl=@f,overwrite={overwrite})"
        ));
        let request = self
            .at(Method::POST, &endpoint, &parent)
            .query(&[("@f", string_literal(name))])
            .body(data.to_vec());
        self.client.send(request).await?;
        debug!("Uploaded file content");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn delete_item(&self, path: &RemotePath) -> StoreResult<()> {
        let endpoint = self.item_endpoint(path, "").await;
        let request = self
            .at(Method::DELETE, &endpoint, path)
            .header(IF_MATCH, "*");
        self.client.send(request).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(folder = %folder))]
    async fn list_child_files(&self, folder: &RemotePath) -> StoreResult<Vec<FileItem>> {
        let request = self
            .at(Method::GET, &folder_endpoint("/Files"), folder)
            .query(&[("$select", FILE_SELECT), ("$expand", FILE_EXPAND)]);
        let entries: Collection<FileEntry> = self.client.get_json(request).await?;
        debug!(count = entries.value.len(), "Listed files");

        let mut files = Vec::with_capacity(entries.value.len());
        for entry in entries.value {
            files.push(self.file_item(entry).await?);
        }
        Ok(files)
    }

    #[instrument(skip_all, fields(folder = %folder))]
    async fn list_child_folders(&self, folder: &RemotePath) -> StoreResult<Vec<FolderItem>> {
        let request = self
            .at(Method::GET, &folder_endpoint("/Folders"), folder)
            .query(&[("$select", FOLDER_SELECT)]);
        let entries: Collection<FolderEntry> = self.client.get_json(request).await?;
        debug!(count = entries.value.len(), "Listed folders");

        Ok(entries
            .value
            .into_iter()
            .map(|entry| FolderItem::new(RemotePath::new(entry.server_relative_url)))
            .collect())
    }

    #[instrument(skip_all, fields(parent = %parent, name = %name))]
    async fn create_folder(&self, parent: &RemotePath, name: &str) -> StoreResult<()> {
        let request = self
            .post(&folder_endpoint("/Folders/AddUsingPath(decodedurl=@f)"), parent)
            .query(&[("@f", string_literal(name))]);
        self.client.send(request).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(src = %src, dest = %dest))]
    async fn move_item(
        &self,
        src: &RemotePath,
        dest: &RemotePath,
        overwrite: bool,
    ) -> StoreResult<()> {
        let endpoint = if self.folder_exists(src).await {
            folder_endpoint("/MoveTo(newurl=@d)")
        } else {
            // MoveOperations: 1 = Overwrite, 0 = None
            file_endpoint(&format!("/MoveTo(newurl=@d,flags={})", u8::from(overwrite)))
        };
        let request = self
            .post(&endpoint, src)
            .query(&[("@d", string_literal(dest.as_str()))]);
        self.client.send(request).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(src = %src, dest = %dest))]
    async fn copy_item(
        &self,
        src: &RemotePath,
        dest: &RemotePath,
        overwrite: bool,
    ) -> StoreResult<()> {
        let endpoint = file_endpoint(&format!(
            "/CopyTo(strnewurl=@d,boverwrite={overwrite})"
        ));
        let request = self
            .post(&endpoint, src)
            .query(&[("@d", string_literal(dest.as_str()))]);
        self.client.send(request).await?;
        Ok(())
    }

    async fn item_exists(&self, path: &RemotePath) -> bool {
        self.folder_exists(path).await || self.file_exists(path).await
    }

    async fn folder_exists(&self, path: &RemotePath) -> bool {
        let request = self
            .at(Method::GET, &folder_endpoint(""), path)
            .query(&[("$select", "Exists")]);
        match self.client.get_json::<ExistsFlag>(request).await {
            Ok(flag) => flag.exists,
            Err(e) => {
                debug!(path = %path, error = %e, "Folder probe failed");
                false
            }
        }
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn check_out(&self, path: &RemotePath) -> StoreResult<()> {
        self.client
            .send(self.post(&file_endpoint("/CheckOut()"), path))
            .await?;
        Ok(())
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn check_in(&self, path: &RemotePath, comment: &str) -> StoreResult<()> {
        // CheckinType: 0 = Minor, 1 = Major, 2 = Overwrite
        let request = self
            .post(&file_endpoint("/CheckIn(comment=@c,checkintype=1)"), path)
            .query(&[("@c", string_literal(comment))]);
        self.client.send(request).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(path = %path))]
    async fn undo_check_out(&self, path: &RemotePath) -> StoreResult<()> {
        self.client
            .send(self.post(&file_endpoint("/UndoCheckOut()"), path))
            .await?;
        Ok(())
    }
}
