//! One-shot site operations
//!
//! Single calls that do not recurse: file transfer, delete, copy and move,
//! folder create/delete/move, listings and the site title. Each checks the
//! session first and reports failures as values, like the tree engine.

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::domain::item::ItemKind;
use crate::domain::newtypes::{LocalPath, RemotePath};
use crate::domain::outcome::{Failure, FailureKind, Outcome};
use crate::ports::{IRemoteStore, RemoteStoreError};

use super::{timed, transfer_file, DEFAULT_REQUEST_TIMEOUT};

/// Use case for non-recursive site operations
pub struct SiteOperationsUseCase {
    store: Arc<dyn IRemoteStore>,
    timeout: Duration,
}

impl SiteOperationsUseCase {
    /// Creates a new SiteOperationsUseCase with the default per-call timeout
    pub fn new(store: Arc<dyn IRemoteStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the bound on each remote call
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Title of the connected site
    ///
    /// # Errors
    /// Returns the classified failure when the lookup fails.
    pub async fn site_title(&self) -> Result<String, Failure> {
        self.ensure_session()?;
        timed(self.timeout, self.store.site_title())
            .await
            .map_err(|e| e.into_failure("Fail to get site title"))
    }

    /// Download a single file, replacing any local file of the same name
    #[instrument(skip_all, fields(remote = %remote, local = %local))]
    pub async fn download_file(&self, remote: &RemotePath, local: &LocalPath) -> Outcome {
        if let Err(failure) = self.ensure_session() {
            return failure.into();
        }
        transfer_file::download_file(self.store.as_ref(), remote, local, self.timeout).await
    }

    /// Upload a single file, overwriting the remote file
    #[instrument(skip_all, fields(local = %local, remote = %remote))]
    pub async fn upload_file(&self, local: &LocalPath, remote: &RemotePath) -> Outcome {
        if let Err(failure) = self.ensure_session() {
            return failure.into();
        }
        transfer_file::upload_file(self.store.as_ref(), local, remote, self.timeout).await
    }

    #[instrument(skip_all, fields(path = %path))]
    pub async fn delete_file(&self, path: &RemotePath) -> Outcome {
        const ACTION: &str = "Fail to delete the file";
        let result = async {
            self.ensure_session()?;
            self.require_file(path, ACTION).await?;
            self.call(ACTION, self.store.delete_item(path)).await
        };
        match result.await {
            Ok(()) => Outcome::success(format!("Deleted the file located on {path}")),
            Err(failure) => failure.into(),
        }
    }

    /// Copy a single file, overwriting the destination
    #[instrument(skip_all, fields(src = %src, dest = %dest))]
    pub async fn copy_file(&self, src: &RemotePath, dest: &RemotePath) -> Outcome {
        const ACTION: &str = "Fail to copy the file";
        let result = async {
            self.ensure_session()?;
            self.require_file(src, ACTION).await?;
            self.call(ACTION, self.store.copy_item(src, dest, true)).await
        };
        match result.await {
            Ok(()) => Outcome::success(format!("Copied the file from {src} to {dest}")),
            Err(failure) => failure.into(),
        }
    }

    /// Move a single file, overwriting the destination
    #[instrument(skip_all, fields(src = %src, dest = %dest))]
    pub async fn move_file(&self, src: &RemotePath, dest: &RemotePath) -> Outcome {
        const ACTION: &str = "Fail to move the file";
        let result = async {
            self.ensure_session()?;
            self.require_file(src, ACTION).await?;
            self.call(ACTION, self.store.move_item(src, dest, true)).await
        };
        match result.await {
            Ok(()) => Outcome::success(format!("Moved the file from {src} to {dest}")),
            Err(failure) => failure.into(),
        }
    }

    #[instrument(skip_all, fields(parent = %parent, name = %name))]
    pub async fn create_folder(&self, parent: &RemotePath, name: &str) -> Outcome {
        const ACTION: &str = "Fail to create the folder";
        let result = async {
            self.ensure_session()?;
            let created = parent.join(name).map_err(|e| {
                Failure::new(FailureKind::MalformedPath, format!("{ACTION} with error: {e}"))
            })?;
            self.call(ACTION, self.store.create_folder(parent, name))
                .await?;
            Ok::<_, Failure>(created)
        };
        match result.await {
            Ok(created) => Outcome::success(format!("Create the folder located in {created}")),
            Err(failure) => failure.into(),
        }
    }

    #[instrument(skip_all, fields(path = %path))]
    pub async fn delete_folder(&self, path: &RemotePath) -> Outcome {
        const ACTION: &str = "Fail to delete the folder";
        let result = async {
            self.ensure_session()?;
            self.require_folder(path, ACTION).await?;
            self.call(ACTION, self.store.delete_item(path)).await
        };
        match result.await {
            Ok(()) => Outcome::success(format!("Deleted the folder located on {path}")),
            Err(failure) => failure.into(),
        }
    }

    /// Move a folder with its whole subtree (server-side)
    #[instrument(skip_all, fields(src = %src, dest = %dest))]
    pub async fn move_folder(&self, src: &RemotePath, dest: &RemotePath) -> Outcome {
        const ACTION: &str = "Fail to move the folder";
        let result = async {
            self.ensure_session()?;
            self.require_folder(src, ACTION).await?;
            self.call(ACTION, self.store.move_item(src, dest, false)).await
        };
        match result.await {
            Ok(()) => Outcome::success(format!("Moved the folder from {src} to {dest}")),
            Err(failure) => failure.into(),
        }
    }

    /// Server-relative paths of the folders directly inside `path`
    ///
    /// # Errors
    /// Returns the classified failure when the listing fails.
    pub async fn list_folders(&self, path: &RemotePath) -> Result<Vec<RemotePath>, Failure> {
        const ACTION: &str = "Failed to get a list of folders in specified folder";
        self.ensure_session()?;
        let folders = self.call(ACTION, self.store.list_child_folders(path)).await?;
        Ok(folders.into_iter().map(|f| f.path).collect())
    }

    /// Server-relative paths of the files directly inside `path`
    ///
    /// # Errors
    /// Returns the classified failure when the listing fails.
    pub async fn list_files(&self, path: &RemotePath) -> Result<Vec<RemotePath>, Failure> {
        const ACTION: &str = "Failed to get a list of files in specified folder";
        self.ensure_session()?;
        let files = self.call(ACTION, self.store.list_child_files(path)).await?;
        Ok(files.into_iter().map(|f| f.path).collect())
    }

    /// Folders then files directly inside `path`
    ///
    /// # Errors
    /// Returns the first listing failure.
    pub async fn list_items(&self, path: &RemotePath) -> Result<Vec<RemotePath>, Failure> {
        let mut items = self.list_folders(path).await?;
        items.extend(self.list_files(path).await?);
        Ok(items)
    }

    fn ensure_session(&self) -> Result<(), Failure> {
        if self.store.is_authenticated() {
            Ok(())
        } else {
            Err(Failure::unauthenticated())
        }
    }

    async fn call<T>(
        &self,
        action: &str,
        call: impl std::future::Future<Output = Result<T, RemoteStoreError>>,
    ) -> Result<T, Failure> {
        timed(self.timeout, call)
            .await
            .map_err(|e| e.into_failure(action))
    }

    async fn require_file(&self, path: &RemotePath, action: &str) -> Result<(), Failure> {
        self.call(action, self.store.get_file(path)).await.map(|_| ())
    }

    async fn require_folder(&self, path: &RemotePath, action: &str) -> Result<(), Failure> {
        let store = self.store.as_ref();
        if tokio::time::timeout(self.timeout, store.folder_exists(path))
            .await
            .unwrap_or(false)
        {
            return Ok(());
        }

        let err = if tokio::time::timeout(self.timeout, store.item_exists(path))
            .await
            .unwrap_or(false)
        {
            RemoteStoreError::WrongKind {
                path: path.clone(),
                expected: ItemKind::Folder,
            }
        } else {
            RemoteStoreError::NotFound(format!("{path} not found"))
        };
        Err(err.into_failure(action))
    }
}
