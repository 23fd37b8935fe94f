use std::time::Duration;

use futures_util::future::BoxFuture;
use tracing::{debug, instrument};

use crate::domain::newtypes::{LocalPath, RemotePath};
use crate::domain::outcome::{Failure, FailureCollector, Outcome};
use crate::usecases::{timed, transfer_file};

use super::TreeSyncUseCase;

const DOWNLOAD_FOLDER_ACTION: &str = "Failed to download the folder";

impl TreeSyncUseCase {
    /// Mirrors the remote folder `remote` into the local directory `local`
    ///
    /// The local directory is created (with ancestors) when missing.
    /// Same-named local files are overwritten; unrelated local files are
    /// left alone. `timeout` bounds each remote call, not the whole walk.
    #[instrument(skip_all, fields(remote = %remote, local = %local))]
    pub async fn download_folder(
        &self,
        remote: &RemotePath,
        local: &LocalPath,
        timeout: Duration,
    ) -> Outcome {
        if !self.store.is_authenticated() {
            return Outcome::unauthenticated();
        }

        let outcome = self
            .download_tree(remote.clone(), local.clone(), timeout)
            .await;
        debug!(failures = outcome.failures().len(), "download finished");
        outcome
    }

    /// One recursion level: files first, then subfolders, both in listing order
    pub(super) fn download_tree(
        &self,
        remote: RemotePath,
        local: LocalPath,
        timeout: Duration,
    ) -> BoxFuture<'_, Outcome> {
        Box::pin(async move {
            if let Err(e) = tokio::fs::create_dir_all(local.as_path()).await {
                return Failure::io(DOWNLOAD_FOLDER_ACTION, &e).into();
            }

            let files = match timed(timeout, self.store.list_child_files(&remote)).await {
                Ok(files) => files,
                Err(e) => return e.into_failure(DOWNLOAD_FOLDER_ACTION).into(),
            };

            let mut collector = FailureCollector::new();
            for file in &files {
                let target = local.join(file.name());
                collector.record(
                    transfer_file::download_file(
                        self.store.as_ref(),
                        &file.path,
                        &target,
                        timeout,
                    )
                    .await,
                );
            }

            match timed(timeout, self.store.list_child_folders(&remote)).await {
                Ok(folders) => {
                    for folder in folders {
                        let target = local.join(folder.name());
                        collector.record(self.download_tree(folder.path, target, timeout).await);
                    }
                }
                Err(e) => collector.push(e.into_failure(DOWNLOAD_FOLDER_ACTION)),
            }

            collector.finish(format!("Downloaded the folder from {remote} to {local}"))
        })
    }
}
