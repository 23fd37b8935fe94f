//! Title command - Connectivity check against the configured site

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use spsync_core::domain::Outcome;
use spsync_core::usecases::SiteOperationsUseCase;

use super::{report_outcome, Context};
use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct TitleCommand {}

impl TitleCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        let ops = SiteOperationsUseCase::new(ctx.connect()?).with_timeout(ctx.timeout());

        match ops.site_title().await {
            Ok(title) => {
                let formatter = ctx.formatter();
                match ctx.format {
                    OutputFormat::Json => formatter.print_json(&serde_json::json!({
                        "site": ctx.site_url()?,
                        "title": title,
                    })),
                    _ => formatter.success(&title),
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(failure) => Ok(report_outcome(ctx, &Outcome::from(failure))),
        }
    }
}
