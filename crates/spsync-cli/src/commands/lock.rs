//! Lock command - Per-file edit lock
//!
//! Provides `spsync lock checkout|checkin|undo|status`. Each transition is
//! a no-op when the file is already in the requested state.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use spsync_core::domain::{Outcome, RemotePath};
use spsync_core::usecases::{FileLockUseCase, LockState};

use super::{report_outcome, Context};
use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum LockCommand {
    /// Check out a file for editing
    Checkout {
        /// Server-relative path of the file
        path: String,
    },
    /// Check in a checked-out file
    Checkin {
        /// Server-relative path of the file
        path: String,
        /// Checkin comment
        #[arg(short, long, default_value = "")]
        comment: String,
    },
    /// Discard a checkout
    Undo {
        /// Server-relative path of the file
        path: String,
    },
    /// Show whether a file is checked out
    Status {
        /// Server-relative path of the file
        path: String,
    },
}

impl LockCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let lock = FileLockUseCase::new(ctx.connect()?).with_timeout(ctx.timeout());

        let outcome = match self {
            LockCommand::Checkout { path } => lock.check_out(&RemotePath::new(path.as_str())).await,
            LockCommand::Checkin { path, comment } => {
                lock.check_in(&RemotePath::new(path.as_str()), comment)
                    .await
            }
            LockCommand::Undo { path } => {
                lock.undo_check_out(&RemotePath::new(path.as_str()))
                    .await
            }
            LockCommand::Status { path } => return Ok(show_state(ctx, &lock, path).await),
        };

        Ok(report_outcome(ctx, &outcome))
    }
}

async fn show_state(ctx: &Context, lock: &FileLockUseCase, path: &str) -> ExitCode {
    let formatter = ctx.formatter();
    let path = RemotePath::new(path);

    match lock.state(&path).await {
        Ok(state) => {
            let checked_out = state == LockState::CheckedOut;
            match ctx.format {
                OutputFormat::Json => formatter.print_json(&serde_json::json!({
                    "path": path,
                    "checked_out": checked_out,
                })),
                OutputFormat::Legacy => formatter.success(if checked_out { "true" } else { "false" }),
                OutputFormat::Human if checked_out => {
                    formatter.success(&format!("{path} is checked out"))
                }
                OutputFormat::Human => formatter.success(&format!("{path} is not checked out")),
            }
            ExitCode::SUCCESS
        }
        Err(failure) => report_outcome(ctx, &Outcome::from(failure)),
    }
}
