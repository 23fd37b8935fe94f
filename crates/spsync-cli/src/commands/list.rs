//! List command - Children of a remote folder
//!
//! `spsync list <path>` prints folders then files; `--files` or `--folders`
//! restricts the listing to one kind.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use spsync_core::domain::RemotePath;
use spsync_core::usecases::SiteOperationsUseCase;

use super::{report_paths, Context};

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Server-relative path of the folder
    pub path: String,
    /// Only list files
    #[arg(long, conflicts_with = "folders")]
    pub files: bool,
    /// Only list folders
    #[arg(long)]
    pub folders: bool,
}

impl ListCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let ops = SiteOperationsUseCase::new(ctx.connect()?).with_timeout(ctx.timeout());
        let path = RemotePath::new(self.path.as_str());

        let result = if self.files {
            ops.list_files(&path).await
        } else if self.folders {
            ops.list_folders(&path).await
        } else {
            ops.list_items(&path).await
        };

        Ok(report_paths(ctx, &result))
    }
}
