//! Recursive tree synchronization
//!
//! [`TreeSyncUseCase`] mirrors whole folder subtrees across the
//! local/remote boundary:
//!
//! - [`download_folder`](TreeSyncUseCase::download_folder) - remote subtree to local disk
//! - [`upload_folder`](TreeSyncUseCase::upload_folder) - local subtree to the remote store
//! - [`copy_folder`](TreeSyncUseCase::copy_folder) - remote to remote, through a
//!   local staging directory
//!
//! ## Traversal
//!
//! Depth-first and strictly sequential. At each level all files are
//! transferred before any subfolder is entered, and every remote call is
//! awaited before the next one is issued. A failing child never stops the
//! traversal; its failures are folded into the parent's [`Outcome`] in
//! visit order.
//!
//! [`Outcome`]: crate::domain::Outcome

mod copy;
mod download;
mod upload;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::ports::IRemoteStore;

/// Where staging directories for folder copies are created, and whether
/// they survive the copy
#[derive(Debug, Clone, Default)]
pub struct StagingOptions {
    /// Parent directory for staging directories (OS temp dir when `None`)
    pub root: Option<PathBuf>,
    /// Leave the staging directory on disk after the copy, for diagnostics
    pub keep: bool,
}

impl StagingOptions {
    /// Create a fresh, uniquely named staging directory
    fn create(&self) -> io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("spsync-copy-").keep(self.keep);
        let dir = match &self.root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        debug!(staging = %dir.path().display(), "created staging directory");
        Ok(dir)
    }

    /// Release a staging directory once the copy has concluded
    fn release(&self, dir: TempDir) {
        let path = dir.path().display().to_string();
        if self.keep {
            info!(staging = %path, "keeping staging directory");
            drop(dir);
            return;
        }
        if let Err(e) = dir.close() {
            warn!(staging = %path, error = %e, "failed to remove staging directory");
        }
    }
}

/// Use case for recursive folder transfers
pub struct TreeSyncUseCase {
    store: Arc<dyn IRemoteStore>,
    staging: StagingOptions,
}

impl TreeSyncUseCase {
    /// Creates a new TreeSyncUseCase bound to a remote store session
    pub fn new(store: Arc<dyn IRemoteStore>) -> Self {
        Self {
            store,
            staging: StagingOptions::default(),
        }
    }

    /// Overrides where copy staging directories live
    #[must_use]
    pub fn with_staging(mut self, staging: StagingOptions) -> Self {
        self.staging = staging;
        self
    }
}
