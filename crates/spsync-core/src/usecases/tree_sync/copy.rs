use std::time::Duration;

use tracing::{debug, instrument};

use crate::domain::newtypes::{LocalPath, RemotePath};
use crate::domain::outcome::{Failure, FailureCollector, Outcome};

use super::TreeSyncUseCase;

const COPY_FOLDER_ACTION: &str = "Failed to copy the folder";

impl TreeSyncUseCase {
    /// Copies the remote folder `src` to `dest` through local staging
    ///
    /// The store has no recursive server-side copy, so the subtree is
    /// downloaded into a fresh staging directory and uploaded from there.
    /// A download failure does not stop the upload phase; failures of both
    /// phases are reported, download first. The staging directory is
    /// released when the copy concludes, whatever the result.
    #[instrument(skip_all, fields(src = %src, dest = %dest))]
    pub async fn copy_folder(
        &self,
        src: &RemotePath,
        dest: &RemotePath,
        timeout: Duration,
    ) -> Outcome {
        if !self.store.is_authenticated() {
            return Outcome::unauthenticated();
        }

        let staging = match self.staging.create() {
            Ok(dir) => dir,
            Err(e) => return Failure::io(COPY_FOLDER_ACTION, &e).into(),
        };
        let staging_path = LocalPath::from(staging.path());

        let mut collector = FailureCollector::new();
        collector.record(
            self.download_tree(src.clone(), staging_path.clone(), timeout)
                .await,
        );
        debug!(failures = collector.len(), "staging download finished");

        collector.record(self.upload_tree(staging_path, dest.clone(), timeout).await);

        self.staging.release(staging);
        collector.finish(format!("Copied the folder from {src} to {dest}"))
    }
}
