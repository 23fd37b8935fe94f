//! CLI command implementations
//!
//! Every command receives the shared [`Context`]: the loaded configuration,
//! the output format, and the site/token overrides from the command line.
//! Commands that talk to the site build their remote store through
//! [`Context::connect`] and print their result through [`report_outcome`]
//! or [`report_paths`].

pub mod completions;
pub mod config;
pub mod file;
pub mod folder;
pub mod list;
pub mod lock;
pub mod site;
pub mod tree;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use spsync_core::config::Config;
use spsync_core::domain::{Failure, Outcome, RemotePath};
use spsync_core::ports::IRemoteStore;
use spsync_sharepoint::client::SharePointClient;
use spsync_sharepoint::provider::SharePointRemoteStore;
use spsync_sharepoint::rate_limit::RetryPolicy;
use tracing::debug;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

/// Settings shared by all commands
pub struct Context {
    pub format: OutputFormat,
    pub config: Config,
    pub config_path: PathBuf,
    /// `--site`, taking precedence over `site.url`
    pub site: Option<String>,
    /// `--token` / `SPSYNC_ACCESS_TOKEN`
    pub token: Option<String>,
}

impl Context {
    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        get_formatter(self.format)
    }

    /// Bound on each remote call
    pub fn timeout(&self) -> Duration {
        self.config.request_timeout()
    }

    /// Site URL from the command line or the config file
    pub fn site_url(&self) -> Result<&str> {
        let url = self.site.as_deref().unwrap_or(&self.config.site.url);
        if url.is_empty() {
            bail!(
                "No site configured. Pass --site or set site.url in {}",
                self.config_path.display()
            );
        }
        Ok(url)
    }

    /// Remote store bound to the configured site
    ///
    /// A missing token still yields a store; it reports itself as
    /// unauthenticated and every operation fails accordingly.
    pub fn connect(&self) -> Result<Arc<dyn IRemoteStore>> {
        let url = self.site_url()?;
        let token = self.token.clone().unwrap_or_default();
        debug!(site = %url, has_token = !token.is_empty(), "Connecting to site");

        let client = SharePointClient::new(url, token)
            .with_retry_policy(RetryPolicy::new(self.config.site.max_retries));
        Ok(Arc::new(SharePointRemoteStore::new(client)))
    }
}

/// Prints an operation outcome and maps it to the process exit code
pub fn report_outcome(ctx: &Context, outcome: &Outcome) -> ExitCode {
    let formatter = ctx.formatter();

    match ctx.format {
        OutputFormat::Legacy => formatter.success(&outcome.to_legacy_string()),
        OutputFormat::Json => formatter.print_json(&serde_json::json!({
            "success": outcome.is_success(),
            "message": outcome.success_message(),
            "failures": outcome.failures(),
        })),
        OutputFormat::Human => match outcome.success_message() {
            Some(message) => formatter.success(message),
            None => {
                for failure in outcome.failures() {
                    formatter.failure(failure);
                }
            }
        },
    }

    exit_code(outcome.is_success())
}

/// Prints a listing result and maps it to the process exit code
pub fn report_paths(ctx: &Context, result: &Result<Vec<RemotePath>, Failure>) -> ExitCode {
    let formatter = ctx.formatter();

    match (ctx.format, result) {
        (OutputFormat::Legacy, Ok(paths)) => {
            let joined: Vec<&str> = paths.iter().map(RemotePath::as_str).collect();
            formatter.success(&joined.join(","));
        }
        (OutputFormat::Legacy, Err(failure)) => formatter.failure(failure),
        (OutputFormat::Json, Ok(paths)) => formatter.print_json(&serde_json::json!({
            "success": true,
            "items": paths,
        })),
        (OutputFormat::Json, Err(failure)) => formatter.print_json(&serde_json::json!({
            "success": false,
            "failures": [failure],
        })),
        (OutputFormat::Human, Ok(paths)) => {
            formatter.success(&format!(
                "{} item{}",
                paths.len(),
                if paths.len() == 1 { "" } else { "s" }
            ));
            for path in paths {
                formatter.info(path.as_str());
            }
        }
        (OutputFormat::Human, Err(failure)) => formatter.failure(failure),
    }

    exit_code(result.is_ok())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
