//! File command - Single file operations
//!
//! Provides `spsync file get|put|delete|copy|move`. Copy and move overwrite
//! an existing destination.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use spsync_core::domain::{LocalPath, RemotePath};
use spsync_core::usecases::SiteOperationsUseCase;

use super::{report_outcome, Context};

#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// Download a file, replacing a local file of the same name
    Get {
        /// Server-relative path of the file
        remote: String,
        /// Local destination path
        local: PathBuf,
    },
    /// Upload a file, replacing the remote file
    Put {
        /// Local file to upload
        local: PathBuf,
        /// Server-relative destination path
        remote: String,
    },
    /// Delete a file
    Delete {
        /// Server-relative path of the file
        path: String,
    },
    /// Copy a file within the site
    Copy {
        src: String,
        dest: String,
    },
    /// Move a file within the site
    Move {
        src: String,
        dest: String,
    },
}

impl FileCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let ops = SiteOperationsUseCase::new(ctx.connect()?).with_timeout(ctx.timeout());

        let outcome = match self {
            FileCommand::Get { remote, local } => {
                ops.download_file(&RemotePath::new(remote.as_str()), &LocalPath::new(local.clone()))
                    .await
            }
            FileCommand::Put { local, remote } => {
                ops.upload_file(&LocalPath::new(local.clone()), &RemotePath::new(remote.as_str()))
                    .await
            }
            FileCommand::Delete { path } => ops.delete_file(&RemotePath::new(path.as_str())).await,
            FileCommand::Copy { src, dest } => {
                ops.copy_file(&RemotePath::new(src.as_str()), &RemotePath::new(dest.as_str()))
                    .await
            }
            FileCommand::Move { src, dest } => {
                ops.move_file(&RemotePath::new(src.as_str()), &RemotePath::new(dest.as_str()))
                    .await
            }
        };

        Ok(report_outcome(ctx, &outcome))
    }
}
