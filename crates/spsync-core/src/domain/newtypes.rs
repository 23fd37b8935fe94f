//! Path newtypes and normalization
//!
//! Remote paths are server-relative, slash-delimited strings such as
//! `/sites/team/Shared Documents/reports`. Local paths are OS-native.
//! Both are trailing-separator insensitive: a single trailing separator is
//! stripped on construction so that joining a child never produces `//`.
//!
//! The free functions [`normalize_remote_folder`], [`normalize_local_folder`]
//! and [`split_parent_and_leaf`] are pure and operate on borrowed strings;
//! the newtypes apply them once at construction time.

use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Separator used by remote store paths
pub const REMOTE_SEPARATOR: char = '/';

// ============================================================================
// Normalization
// ============================================================================

/// Strips exactly one trailing `/` from a remote folder path.
///
/// The bare root `/` is left untouched. Applying the function twice yields
/// the same result as applying it once for inputs with at most one
/// trailing separator.
#[must_use]
pub fn normalize_remote_folder(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix(REMOTE_SEPARATOR).unwrap_or(path)
    } else {
        path
    }
}

/// Strips exactly one trailing OS separator from a local folder path.
///
/// The bare filesystem root is left untouched.
#[must_use]
pub fn normalize_local_folder(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix(MAIN_SEPARATOR).unwrap_or(path)
    } else {
        path
    }
}

/// Splits a remote path into `(parent, leaf)` at the last `/`.
///
/// # Errors
/// Returns [`DomainError::NoParent`] if the path contains no `/`.
pub fn split_parent_and_leaf(path: &str) -> Result<(&str, &str), DomainError> {
    path.rfind(REMOTE_SEPARATOR)
        .map(|idx| (&path[..idx], &path[idx + 1..]))
        .ok_or_else(|| DomainError::NoParent(path.to_string()))
}

// ============================================================================
// RemotePath
// ============================================================================

/// A normalized server-relative path in the remote store
///
/// May denote either a file or a folder; which one is only known by asking
/// the store. Shape is not validated here: the store rejects paths it cannot
/// resolve (full URLs, sharing links).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RemotePath(String);

impl RemotePath {
    /// Create a new RemotePath, stripping one trailing separator
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        let normalized_len = normalize_remote_folder(&path).len();
        path.truncate(normalized_len);
        Self(path)
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join a single child name onto this path
    ///
    /// # Errors
    /// Returns error if `name` is empty or contains a separator
    pub fn join(&self, name: &str) -> Result<Self, DomainError> {
        if name.is_empty() || name.contains(REMOTE_SEPARATOR) {
            return Err(DomainError::InvalidComponent(name.to_string()));
        }

        let joined = if self.0 == "/" {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.0)
        };

        Ok(Self(joined))
    }

    /// Split into the parent path and the leaf name
    ///
    /// # Errors
    /// Returns error if the path contains no `/`
    pub fn split_parent(&self) -> Result<(RemotePath, &str), DomainError> {
        let (parent, leaf) = split_parent_and_leaf(&self.0)?;
        Ok((Self(parent.to_string()), leaf))
    }

    /// The leaf name (everything after the last `/`, or the whole path)
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit(REMOTE_SEPARATOR).next().unwrap_or(&self.0)
    }
}

impl Display for RemotePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RemotePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for RemotePath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for RemotePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<RemotePath> for String {
    fn from(path: RemotePath) -> Self {
        path.0
    }
}

// ============================================================================
// LocalPath
// ============================================================================

/// A normalized local filesystem path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalPath(PathBuf);

impl LocalPath {
    /// Create a new LocalPath, stripping one trailing OS separator
    ///
    /// Paths that are not valid UTF-8 are kept as given.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match path.to_str() {
            Some(s) => Self(PathBuf::from(normalize_local_folder(s))),
            None => Self(path),
        }
    }

    /// Get the inner path reference
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Join a child name onto this path
    #[must_use]
    pub fn join(&self, name: impl AsRef<Path>) -> Self {
        Self(self.0.join(name))
    }

    /// Convert to owned PathBuf
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl Display for LocalPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for LocalPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for LocalPath {
    fn from(path: &Path) -> Self {
        Self::new(path.to_path_buf())
    }
}

impl From<&str> for LocalPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl AsRef<Path> for LocalPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
