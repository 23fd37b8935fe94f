//! Remote store port (driven/secondary port)
//!
//! This module defines the interface for the hierarchical document store
//! that spsync mirrors to and from. The primary implementation targets
//! SharePoint document libraries over the SharePoint REST API, but the
//! trait only speaks in server-relative paths so other stores can plug in.
//!
//! ## Design Notes
//!
//! - Every method is a single blocking round trip from the caller's point
//!   of view; use cases await each call before issuing the next.
//! - Errors are classified with [`RemoteStoreError::kind`] so use cases can
//!   report the failure taxonomy without knowing the adapter.
//! - Uses `#[async_trait]` for async trait methods.

use std::time::Duration;

use thiserror::Error;

use crate::domain::item::{FileItem, FolderItem, ItemKind};
use crate::domain::newtypes::RemotePath;
use crate::domain::outcome::{Failure, FailureKind, UNAUTHENTICATED_MESSAGE};

// ============================================================================
// RemoteStoreError
// ============================================================================

/// Errors returned by remote store adapters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteStoreError {
    /// No usable session (missing or rejected credentials)
    #[error("{}", UNAUTHENTICATED_MESSAGE)]
    Unauthenticated,

    /// The path does not resolve to an item; carries the store's message
    #[error("{0}")]
    NotFound(String),

    /// The path resolves to the other kind of item
    #[error("{path} is not a {expected}")]
    WrongKind {
        /// The offending path
        path: RemotePath,
        /// What the operation needed
        expected: ItemKind,
    },

    /// The store refused the path shape
    #[error("{0}")]
    MalformedPath(String),

    /// The call did not complete within the caller's timeout
    #[error("The operation has timed out after {0:?}")]
    Timeout(Duration),

    /// Connectivity failure before a response was received
    #[error("{0}")]
    Transport(String),

    /// Any other failure reported by the store
    #[error("{0}")]
    Rejected(String),
}

impl RemoteStoreError {
    /// Classify this error into the failure taxonomy
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            RemoteStoreError::Unauthenticated => FailureKind::Unauthenticated,
            RemoteStoreError::NotFound(_) => FailureKind::NotFound,
            RemoteStoreError::WrongKind { .. } => FailureKind::WrongKind,
            RemoteStoreError::MalformedPath(_) => FailureKind::MalformedPath,
            RemoteStoreError::Timeout(_)
            | RemoteStoreError::Transport(_)
            | RemoteStoreError::Rejected(_) => FailureKind::Unknown,
        }
    }

    /// Convert into a leaf failure for the given action phrase
    ///
    /// `action` reads like "Fail to download the file"; the store's own
    /// message is appended after "with error:".
    #[must_use]
    pub fn into_failure(self, action: &str) -> Failure {
        Failure::new(self.kind(), format!("{action} with error: {self}"))
    }
}

/// Result alias for remote store calls
pub type StoreResult<T> = Result<T, RemoteStoreError>;

// ============================================================================
// IRemoteStore trait
// ============================================================================

/// Port trait for remote document store operations
///
/// All paths are server-relative and already normalized by the caller.
/// Implementations must not cache item state across calls: checkout state
/// in particular is re-derived by the lock controller on every operation.
#[async_trait::async_trait]
pub trait IRemoteStore: Send + Sync {
    /// Whether a session is available; checked before every public operation
    fn is_authenticated(&self) -> bool;

    /// Title of the site the session is bound to
    async fn site_title(&self) -> StoreResult<String>;

    /// Fresh snapshot of a single file, including its checkout state
    ///
    /// Returns [`RemoteStoreError::WrongKind`] if the path is a folder.
    async fn get_file(&self, path: &RemotePath) -> StoreResult<FileItem>;

    /// Download a file's content
    async fn get_file_bytes(&self, path: &RemotePath) -> StoreResult<Vec<u8>>;

    /// Upload a file's content, replacing an existing file when `overwrite`
    async fn put_file_bytes(
        &self,
        path: &RemotePath,
        data: &[u8],
        overwrite: bool,
    ) -> StoreResult<()>;

    /// Delete a file or folder
    async fn delete_item(&self, path: &RemotePath) -> StoreResult<()>;

    /// Files directly inside `folder`, in store listing order
    async fn list_child_files(&self, folder: &RemotePath) -> StoreResult<Vec<FileItem>>;

    /// Folders directly inside `folder`, in store listing order
    async fn list_child_folders(&self, folder: &RemotePath) -> StoreResult<Vec<FolderItem>>;

    /// Create folder `name` inside `parent`
    async fn create_folder(&self, parent: &RemotePath, name: &str) -> StoreResult<()>;

    /// Move a file or folder
    async fn move_item(&self, src: &RemotePath, dest: &RemotePath, overwrite: bool)
        -> StoreResult<()>;

    /// Copy a single file (folders are copied through a local staging round trip)
    async fn copy_item(&self, src: &RemotePath, dest: &RemotePath, overwrite: bool)
        -> StoreResult<()>;

    /// Whether anything exists at `path`
    async fn item_exists(&self, path: &RemotePath) -> bool;

    /// Whether a folder exists at `path`
    async fn folder_exists(&self, path: &RemotePath) -> bool;

    /// Take the edit lock on a file
    async fn check_out(&self, path: &RemotePath) -> StoreResult<()>;

    /// Commit edits and release the edit lock
    async fn check_in(&self, path: &RemotePath, comment: &str) -> StoreResult<()>;

    /// Release the edit lock, discarding pending edits
    async fn undo_check_out(&self, path: &RemotePath) -> StoreResult<()>;
}
