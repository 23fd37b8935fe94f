//! spsync CLI - Command-line interface for spsync
//!
//! Provides commands for:
//! - Mirroring folder trees between local disk and a SharePoint site
//! - Copying folder trees within a site
//! - Single file and folder operations
//! - Checkout / checkin of individual files
//! - Viewing and editing the configuration

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use spsync_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    completions::CompletionsCommand,
    config::ConfigCommand,
    file::FileCommand,
    folder::FolderCommand,
    list::ListCommand,
    lock::LockCommand,
    site::TitleCommand,
    tree::{CopyCommand, DownloadCommand, UploadCommand},
    Context,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "spsync",
    version,
    about = "Mirror folder trees between local disk and SharePoint"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Print results in the `FAIL:`-prefixed legacy string form
    #[arg(long, global = true, conflicts_with = "json")]
    legacy: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Site URL, overriding `site.url` from the config file
    #[arg(long, global = true)]
    site: Option<String>,

    /// OAuth2 access token for the site
    #[arg(long, global = true, env = "SPSYNC_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download a remote folder tree to a local directory
    Download(DownloadCommand),
    /// Upload a local directory tree to a remote folder
    Upload(UploadCommand),
    /// Copy a remote folder tree to another remote location
    Copy(CopyCommand),
    /// Single file operations
    #[command(subcommand)]
    File(FileCommand),
    /// Single folder operations
    #[command(subcommand)]
    Folder(FolderCommand),
    /// Checkout, checkin, and undo checkout of a file
    #[command(subcommand)]
    Lock(LockCommand),
    /// List the children of a remote folder
    List(ListCommand),
    /// Show the title of the connected site
    Title(TitleCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Filter directive used when `RUST_LOG` is not set
fn log_filter(verbose: u8, quiet: bool, configured: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Rejects a configuration that `validate` finds problems with
fn ensure_valid(config: &Config, path: &Path) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!(
        "Invalid configuration in {}: {}",
        path.display(),
        details.join("; ")
    );
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_path) = match &cli.config {
        Some(path) => (Config::load(path)?, path.clone()),
        None => {
            let path = Config::default_path();
            (Config::load_or_default(&path), path)
        }
    };

    // `config` must stay usable to repair a broken file
    if !matches!(cli.command, Commands::Config(_) | Commands::Completions(_)) {
        ensure_valid(&config, &config_path)?;
    }

    // Setup tracing
    let filter = log_filter(cli.verbose, cli.quiet, &config.logging.level);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let format = if cli.legacy {
        OutputFormat::Legacy
    } else if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let ctx = Context {
        format,
        config,
        config_path,
        site: cli.site,
        token: cli.token,
    };

    match cli.command {
        Commands::Download(cmd) => cmd.execute(&ctx).await,
        Commands::Upload(cmd) => cmd.execute(&ctx).await,
        Commands::Copy(cmd) => cmd.execute(&ctx).await,
        Commands::File(cmd) => cmd.execute(&ctx).await,
        Commands::Folder(cmd) => cmd.execute(&ctx).await,
        Commands::Lock(cmd) => cmd.execute(&ctx).await,
        Commands::List(cmd) => cmd.execute(&ctx).await,
        Commands::Title(cmd) => cmd.execute(&ctx).await,
        Commands::Config(cmd) => cmd.execute(&ctx).await,
        Commands::Completions(cmd) => cmd.execute(&ctx).await,
    }
}
