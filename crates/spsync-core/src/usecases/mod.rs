//! Use cases (interactors) for spsync
//!
//! This module contains the application use cases that orchestrate
//! domain values, the remote store port, and the local disk. Use cases are
//! thin coordinators: they check the session, bound each remote call with
//! the caller's timeout, and fold leaf failures into a single [`Outcome`].
//!
//! ## Use Cases
//!
//! - [`TreeSyncUseCase`] - Recursive folder download, upload, and copy
//! - [`FileLockUseCase`] - Checkout / checkin / undo-checkout of a single file
//! - [`SiteOperationsUseCase`] - One-shot file and folder operations
//!
//! [`Outcome`]: crate::domain::Outcome

pub mod file_lock;
pub mod site_operations;
mod transfer_file;
pub mod tree_sync;

pub use file_lock::{FileLockUseCase, LockState};
pub use site_operations::SiteOperationsUseCase;
pub use tree_sync::{StagingOptions, TreeSyncUseCase};

use std::future::Future;
use std::time::Duration;

use crate::ports::{RemoteStoreError, StoreResult};

/// Default bound on a single remote call (the historical three minutes)
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// Awaits one remote call, failing with [`RemoteStoreError::Timeout`] if it
/// does not complete within `timeout`.
pub(crate) async fn timed<T, F>(timeout: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(RemoteStoreError::Timeout(timeout)),
    }
}
