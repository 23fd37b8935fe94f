//! Tree commands - Recursive folder transfers
//!
//! Provides `spsync download`, `spsync upload` and `spsync copy`, each
//! mirroring a whole folder subtree. Failures deep in the tree do not stop
//! the walk; they are all reported once it finishes.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use spsync_core::domain::{LocalPath, RemotePath};
use spsync_core::usecases::TreeSyncUseCase;
use tracing::info;

use super::{report_outcome, Context};

/// Download a remote folder tree
#[derive(Debug, Args)]
pub struct DownloadCommand {
    /// Server-relative path of the remote folder
    pub remote: String,
    /// Local directory to mirror into (created when missing)
    pub local: PathBuf,
}

impl DownloadCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let engine = TreeSyncUseCase::new(ctx.connect()?);
        let remote = RemotePath::new(self.remote.as_str());
        let local = LocalPath::new(self.local.clone());

        info!(remote = %remote, local = %local, "Downloading folder");
        let outcome = engine.download_folder(&remote, &local, ctx.timeout()).await;
        Ok(report_outcome(ctx, &outcome))
    }
}

/// Upload a local directory tree
#[derive(Debug, Args)]
pub struct UploadCommand {
    /// Local directory to upload
    pub local: PathBuf,
    /// Server-relative path of the remote folder to create
    pub remote: String,
}

impl UploadCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let engine = TreeSyncUseCase::new(ctx.connect()?);
        let local = LocalPath::new(self.local.clone());
        let remote = RemotePath::new(self.remote.as_str());

        info!(local = %local, remote = %remote, "Uploading folder");
        let outcome = engine.upload_folder(&local, &remote, ctx.timeout()).await;
        Ok(report_outcome(ctx, &outcome))
    }
}

/// Copy a remote folder tree through a local staging directory
#[derive(Debug, Args)]
pub struct CopyCommand {
    /// Server-relative path of the source folder
    pub src: String,
    /// Server-relative path of the destination folder
    pub dest: String,
    /// Leave the staging directory on disk afterwards
    #[arg(long)]
    pub keep_staging: bool,
}

impl CopyCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let mut staging = ctx.config.staging_options();
        staging.keep |= self.keep_staging;
        let engine = TreeSyncUseCase::new(ctx.connect()?).with_staging(staging);
        let src = RemotePath::new(self.src.as_str());
        let dest = RemotePath::new(self.dest.as_str());

        info!(src = %src, dest = %dest, "Copying folder");
        let outcome = engine.copy_folder(&src, &dest, ctx.timeout()).await;
        Ok(report_outcome(ctx, &outcome))
    }
}
