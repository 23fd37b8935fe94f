//! Config command - View and manage spsync configuration
//!
//! Provides the `spsync config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Subcommand;
use spsync_core::config::Config;
use tracing::info;

use super::Context;
use crate::output::OutputFormat;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "site.url")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, ctx: &Context) -> Result<ExitCode> {
        match self {
            ConfigCommand::Show => self.execute_show(ctx),
            ConfigCommand::Set { key, value } => self.execute_set(ctx, key, value),
            ConfigCommand::Validate => self.execute_validate(ctx),
        }
    }

    fn execute_show(&self, ctx: &Context) -> Result<ExitCode> {
        let formatter = ctx.formatter();
        let config_path = &ctx.config_path;

        info!(config_path = %config_path.display(), "Showing configuration");

        if matches!(ctx.format, OutputFormat::Json) {
            let json = serde_json::to_value(&ctx.config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&ctx.config)
                .context("Failed to serialize configuration to YAML")?;

            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(ExitCode::SUCCESS)
    }

    fn execute_set(&self, ctx: &Context, key: &str, value: &str) -> Result<ExitCode> {
        let formatter = ctx.formatter();
        let config_path = &ctx.config_path;
        let mut config = ctx.config.clone();

        info!(key = %key, value = %value, "Setting configuration value");

        if let Err(e) = apply_config_value(&mut config, key, value) {
            if matches!(ctx.format, OutputFormat::Json) {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "value": value,
                    "error": e.to_string(),
                }));
            } else {
                formatter.error(&format!("Failed to set '{}': {}", key, e));
                formatter.info("");
                formatter.info("Supported keys:");
                for (key, description) in SUPPORTED_KEYS {
                    formatter.info(&format!("  {key:<24} - {description}"));
                }
            }
            return Ok(ExitCode::FAILURE);
        }

        // Validate the new config before saving; the staging dir may not exist yet
        let errors: Vec<String> = config
            .validate()
            .iter()
            .filter(|e| e.field != "transfer.staging_dir")
            .map(ToString::to_string)
            .collect();

        if !errors.is_empty() {
            if matches!(ctx.format, OutputFormat::Json) {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "value": value,
                    "errors": errors,
                }));
            } else {
                formatter.error(&format!(
                    "Invalid value for '{}': {}",
                    key,
                    errors.join("; ")
                ));
            }
            return Ok(ExitCode::FAILURE);
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create configuration directory")?;
        }
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
        std::fs::write(config_path, &yaml).context("Failed to write configuration file")?;

        if matches!(ctx.format, OutputFormat::Json) {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "value": value,
                "config_path": config_path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {} = {}", key, value));
            formatter.info(&format!("Saved to {}", config_path.display()));
        }

        Ok(ExitCode::SUCCESS)
    }

    fn execute_validate(&self, ctx: &Context) -> Result<ExitCode> {
        let formatter = ctx.formatter();
        let config_path = &ctx.config_path;

        if !config_path.exists() {
            if matches!(ctx.format, OutputFormat::Json) {
                formatter.print_json(&serde_json::json!({
                    "valid": false,
                    "config_path": config_path.display().to_string(),
                    "errors": ["Configuration file not found. Using defaults."],
                }));
            } else {
                formatter.info(&format!(
                    "Configuration file not found at {}",
                    config_path.display()
                ));
                formatter.info(
                    "Using default configuration. Run 'spsync config set <key> <value>' to create one.",
                );
            }
            return Ok(ExitCode::SUCCESS);
        }

        // Load explicitly so parse errors surface instead of falling back to defaults
        let config = match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if matches!(ctx.format, OutputFormat::Json) {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [format!("{:#}", e)],
                    }));
                } else {
                    formatter.error(&format!("{:#}", e));
                }
                return Ok(ExitCode::FAILURE);
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = config.validate();

        if matches!(ctx.format, OutputFormat::Json) {
            let error_strings: Vec<String> = errors.iter().map(ToString::to_string).collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
        } else {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            formatter.info(&format!("File: {}", config_path.display()));
            formatter.info("");
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        Ok(if errors.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}

const SUPPORTED_KEYS: &[(&str, &str)] = &[
    ("site.url", "SharePoint site URL"),
    ("site.timeout_minutes", "Bound on each remote call"),
    ("site.max_retries", "Retries for throttled requests"),
    ("transfer.staging_dir", "Parent of copy staging dirs (\"none\" for OS temp)"),
    ("transfer.keep_staging", "true|false"),
    ("logging.level", "trace|debug|info|warn|error"),
];

/// Apply a dot-notation key/value pair to a Config struct
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        // --- site ---
        "site.url" => {
            config.site.url = value.trim_end_matches('/').to_string();
        }
        "site.timeout_minutes" => {
            config.site.timeout_minutes = value
                .parse::<u64>()
                .context("Expected a positive integer for site.timeout_minutes")?;
        }
        "site.max_retries" => {
            config.site.max_retries = value
                .parse::<u32>()
                .context("Expected a positive integer for site.max_retries")?;
        }

        // --- transfer ---
        "transfer.staging_dir" => {
            config.transfer.staging_dir = if value.is_empty() || value == "none" {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        "transfer.keep_staging" => {
            config.transfer.keep_staging = value
                .parse::<bool>()
                .context("Expected true or false for transfer.keep_staging")?;
        }

        // --- logging ---
        "logging.level" => {
            config.logging.level = value.to_string();
        }

        _ => {
            anyhow::bail!("Unknown configuration key: '{}'", key);
        }
    }

    Ok(())
}
