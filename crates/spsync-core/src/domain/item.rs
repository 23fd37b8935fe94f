//! Remote item identities
//!
//! [`FileItem`] and [`FolderItem`] are snapshots taken from a single listing
//! or lookup. They are never cached across operations; every use case
//! re-fetches the item it is about to act on.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::newtypes::RemotePath;

/// Whether a remote path denotes a file or a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::File => write!(f, "file"),
            ItemKind::Folder => write!(f, "folder"),
        }
    }
}

/// Checkout (edit lock) state of a remote file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "user", rename_all = "snake_case")]
pub enum CheckOutState {
    /// Nobody holds the lock
    #[default]
    Free,
    /// Checked out by the authenticated user
    CheckedOutBySelf,
    /// Checked out by someone else; carries their identity when known
    CheckedOutByOther(Option<String>),
}

impl CheckOutState {
    /// Returns true unless the file is [`CheckOutState::Free`]
    #[must_use]
    pub fn is_checked_out(&self) -> bool {
        !matches!(self, CheckOutState::Free)
    }
}

/// A remote file as observed by a listing or lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileItem {
    pub path: RemotePath,
    pub checkout: CheckOutState,
}

impl FileItem {
    /// A file that nobody has checked out
    #[must_use]
    pub fn new(path: RemotePath) -> Self {
        Self {
            path,
            checkout: CheckOutState::Free,
        }
    }

    #[must_use]
    pub fn with_checkout(mut self, checkout: CheckOutState) -> Self {
        self.checkout = checkout;
        self
    }

    /// The file name (last path segment)
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.name()
    }
}

/// A remote folder as observed by a listing
///
/// Children are not part of the snapshot; they are listed lazily, one
/// recursion level at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderItem {
    pub path: RemotePath,
}

impl FolderItem {
    #[must_use]
    pub fn new(path: RemotePath) -> Self {
        Self { path }
    }

    /// The folder name (last path segment)
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.name()
    }
}
