//! Folder command - Single folder operations
//!
//! Provides `spsync folder create|delete|move`. Moving a folder is a single
//! server-side call; use `spsync copy` to duplicate a tree.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use spsync_core::domain::RemotePath;
use spsync_core::usecases::SiteOperationsUseCase;

use super::{report_outcome, Context};

#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Create a folder inside an existing parent
    Create {
        /// Server-relative path of the parent folder
        parent: String,
        /// Name of the new folder
        name: String,
    },
    /// Delete a folder and everything in it
    Delete {
        /// Server-relative path of the folder
        path: String,
    },
    /// Move a folder within the site
    Move {
        src: String,
        dest: String,
    },
}

impl FolderCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let ops = SiteOperationsUseCase::new(ctx.connect()?).with_timeout(ctx.timeout());

        let outcome = match self {
            FolderCommand::Create { parent, name } => {
                ops.create_folder(&RemotePath::new(parent.as_str()), name)
                    .await
            }
            FolderCommand::Delete { path } => {
                ops.delete_folder(&RemotePath::new(path.as_str())).await
            }
            FolderCommand::Move { src, dest } => {
                ops.move_folder(&RemotePath::new(src.as_str()), &RemotePath::new(dest.as_str()))
                    .await
            }
        };

        Ok(report_outcome(ctx, &outcome))
    }
}
