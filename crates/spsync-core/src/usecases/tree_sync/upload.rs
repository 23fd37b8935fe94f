use std::io;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tracing::{debug, instrument, warn};

use crate::domain::newtypes::{LocalPath, RemotePath};
use crate::domain::outcome::{Failure, FailureCollector, FailureKind, Outcome};
use crate::usecases::{timed, transfer_file};

use super::TreeSyncUseCase;

const UPLOAD_FOLDER_ACTION: &str = "Failed to upload the folder";
const CREATE_FOLDER_ACTION: &str = "Fail to create the folder";
const READ_ENTRY_ACTION: &str = "Failed to read the local entry";

/// Direct children of a local directory, split by kind and sorted by name
///
/// `failures` holds one entry per child that could not be inspected, in
/// directory order.
#[derive(Debug, Default)]
struct LocalEntries {
    files: Vec<String>,
    dirs: Vec<String>,
    failures: Vec<Failure>,
}

impl TreeSyncUseCase {
    /// Mirrors the local directory `local` into the remote folder `remote`
    ///
    /// Fails immediately, without touching the store, when `local` is not
    /// an existing directory. Missing remote folders are created; existing
    /// ones are reused. Files are uploaded with overwrite.
    #[instrument(skip_all, fields(local = %local, remote = %remote))]
    pub async fn upload_folder(
        &self,
        local: &LocalPath,
        remote: &RemotePath,
        timeout: Duration,
    ) -> Outcome {
        if !self.store.is_authenticated() {
            return Outcome::unauthenticated();
        }

        let outcome = self.upload_tree(local.clone(), remote.clone(), timeout).await;
        debug!(failures = outcome.failures().len(), "upload finished");
        outcome
    }

    /// One recursion level: files first, then subdirectories, both by name
    pub(super) fn upload_tree(
        &self,
        local: LocalPath,
        remote: RemotePath,
        timeout: Duration,
    ) -> BoxFuture<'_, Outcome> {
        Box::pin(async move {
            let is_dir = tokio::fs::metadata(local.as_path())
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            if !is_dir {
                return Failure::new(
                    FailureKind::NotFound,
                    format!("{UPLOAD_FOLDER_ACTION} with error: {local} not found"),
                )
                .into();
            }

            // Children are not attempted against a folder that could not be created.
            if let Err(failure) = self.ensure_remote_folder(&remote, timeout).await {
                return failure.into();
            }

            let mut collector = FailureCollector::new();
            let entries = match read_local_entries(&local).await {
                Ok(entries) => entries,
                Err(e) => return Failure::io(UPLOAD_FOLDER_ACTION, &e).into(),
            };
            for failure in entries.failures {
                collector.push(failure);
            }

            for name in &entries.files {
                let source = local.join(name);
                match remote.join(name) {
                    Ok(target) => collector.record(
                        transfer_file::upload_file(self.store.as_ref(), &source, &target, timeout)
                            .await,
                    ),
                    Err(e) => collector.push(Failure::new(
                        FailureKind::MalformedPath,
                        format!("{} with error: {e}", transfer_file::UPLOAD_FILE_ACTION),
                    )),
                }
            }

            for name in &entries.dirs {
                let source = local.join(name);
                match remote.join(name) {
                    Ok(target) => {
                        collector.record(self.upload_tree(source, target, timeout).await);
                    }
                    Err(e) => collector.push(Failure::new(
                        FailureKind::MalformedPath,
                        format!("{UPLOAD_FOLDER_ACTION} with error: {e}"),
                    )),
                }
            }

            collector.finish(format!("Uploaded the folder from {local} to {remote}"))
        })
    }

    /// Creates `remote` under its parent unless the store already has it
    async fn ensure_remote_folder(
        &self,
        remote: &RemotePath,
        timeout: Duration,
    ) -> Result<(), Failure> {
        let exists = tokio::time::timeout(timeout, self.store.folder_exists(remote))
            .await
            .unwrap_or(false);
        if exists {
            return Ok(());
        }

        let (parent, name) = remote.split_parent().map_err(|e| {
            Failure::new(
                FailureKind::MalformedPath,
                format!("{CREATE_FOLDER_ACTION} with error: {e}"),
            )
        })?;

        debug!(parent = %parent, name, "creating remote folder");
        timed(timeout, self.store.create_folder(&parent, name))
            .await
            .map_err(|e| e.into_failure(CREATE_FOLDER_ACTION))
    }
}

/// Lists the direct children of `dir`
///
/// Symlinks to files are followed. Symlinks to directories are skipped, so a
/// link back to an ancestor cannot recurse forever. Entries that are neither
/// files nor directories are ignored.
///
/// A child that cannot be inspected (a dangling link, a name that is not
/// valid UTF-8, a permission error) becomes a failure naming its path; its
/// siblings are still listed. Only a directory that cannot be opened or
/// iterated is an error.
async fn read_local_entries(dir: &LocalPath) -> io::Result<LocalEntries> {
    let mut entries = LocalEntries::default();
    let mut read_dir = tokio::fs::read_dir(dir.as_path()).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        let entry_failure = |kind: FailureKind, reason: String| {
            Failure::new(
                kind,
                format!("{READ_ENTRY_ACTION} with error: {}: {reason}", path.display()),
            )
        };

        let Ok(name) = entry.file_name().into_string() else {
            entries.failures.push(entry_failure(
                FailureKind::MalformedPath,
                "file name is not valid UTF-8".to_string(),
            ));
            continue;
        };

        let is_link = match entry.file_type().await {
            Ok(file_type) => file_type.is_symlink(),
            Err(e) => {
                entries.failures.push(entry_failure(io_kind(&e), e.to_string()));
                continue;
            }
        };

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                entries.failures.push(entry_failure(io_kind(&e), e.to_string()));
                continue;
            }
        };

        if metadata.is_dir() {
            if is_link {
                warn!(path = %path.display(), "skipping symlinked directory");
            } else {
                entries.dirs.push(name);
            }
        } else if metadata.is_file() {
            entries.files.push(name);
        }
    }

    entries.files.sort();
    entries.dirs.sort();
    Ok(entries)
}

fn io_kind(err: &io::Error) -> FailureKind {
    if err.kind() == io::ErrorKind::NotFound {
        FailureKind::NotFound
    } else {
        FailureKind::Io
    }
}
