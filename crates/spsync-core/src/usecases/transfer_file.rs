//! Single-file transfers between the local disk and the remote store
//!
//! These are the leaves of the tree engine. Each one catches its own
//! failure and returns it as an [`Outcome`] instead of aborting the caller,
//! so a folder transfer can keep visiting siblings.

use std::time::Duration;

use tracing::debug;

use crate::domain::newtypes::{LocalPath, RemotePath};
use crate::domain::outcome::{Failure, Outcome};
use crate::ports::IRemoteStore;

use super::timed;

pub(crate) const DOWNLOAD_FILE_ACTION: &str = "Fail to download the file";
pub(crate) const UPLOAD_FILE_ACTION: &str = "Fail to upload the file";

/// Download `remote` into `local`, replacing any existing local file
pub(crate) async fn download_file(
    store: &dyn IRemoteStore,
    remote: &RemotePath,
    local: &LocalPath,
    timeout: Duration,
) -> Outcome {
    let data = match timed(timeout, store.get_file_bytes(remote)).await {
        Ok(data) => data,
        Err(e) => return e.into_failure(DOWNLOAD_FILE_ACTION).into(),
    };

    if let Err(e) = tokio::fs::write(local.as_path(), &data).await {
        return Failure::io(DOWNLOAD_FILE_ACTION, &e).into();
    }

    debug!(remote = %remote, local = %local, bytes = data.len(), "file downloaded");
    Outcome::success(format!("File Downloaded from {remote} to {local}"))
}

/// Upload `local` to `remote`, overwriting an existing remote file
pub(crate) async fn upload_file(
    store: &dyn IRemoteStore,
    local: &LocalPath,
    remote: &RemotePath,
    timeout: Duration,
) -> Outcome {
    let data = match tokio::fs::read(local.as_path()).await {
        Ok(data) => data,
        Err(e) => return Failure::io(UPLOAD_FILE_ACTION, &e).into(),
    };

    if let Err(e) = timed(timeout, store.put_file_bytes(remote, &data, true)).await {
        return e.into_failure(UPLOAD_FILE_ACTION).into();
    }

    debug!(local = %local, remote = %remote, bytes = data.len(), "file uploaded");
    Outcome::success(format!("File uploaded from {local} to {remote}"))
}
