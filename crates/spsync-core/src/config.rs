//! spsync configuration
//!
//! `config.yaml` holds the site to talk to, how long a single remote call
//! may take, where folder copies are staged, and the log level. Every key
//! is optional; missing sections take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::usecases::StagingOptions;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for spsync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub transfer: TransferConfig,
    pub logging: LoggingConfig,
}

/// SharePoint site connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute URL of the site, e.g. `https://contoso.sharepoint.com/sites/team`.
    /// Empty until configured; the CLI `--site` flag takes precedence.
    pub url: String,
    /// Bound on each individual remote call, in minutes.
    pub timeout_minutes: u64,
    /// Attempts made for a throttled (429/503) request before giving up.
    pub max_retries: u32,
}

/// Local side of folder transfers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Parent directory for folder-copy staging. OS temp dir when unset.
    pub staging_dir: Option<PathBuf>,
    /// Leave staging directories on disk after a copy.
    pub keep_staging: bool,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Reads and parses the YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing or unreadable file yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Where the config file lives when `--config` is not given.
    ///
    /// Typically `$XDG_CONFIG_HOME/spsync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("spsync")
            .join("config.yaml")
    }

    /// Per-call timeout derived from `site.timeout_minutes`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.site.timeout_minutes.saturating_mul(60))
    }

    /// Staging settings for folder copies.
    pub fn staging_options(&self) -> StagingOptions {
        StagingOptions {
            root: self.transfer.staging_dir.clone(),
            keep: self.transfer.keep_staging,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_minutes: 3,
            max_retries: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// One problem found by [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"site.timeout_minutes"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Levels accepted by `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Checks every section and collects all problems.
    ///
    /// An empty vector means the configuration is valid. An empty `site.url`
    /// is accepted here since the site can be given on the command line.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- site ---
        if !self.site.url.is_empty()
            && !(self.site.url.starts_with("https://") || self.site.url.starts_with("http://"))
        {
            errors.push(ValidationError {
                field: "site.url".into(),
                message: format!("must be an http(s) URL, got '{}'", self.site.url),
            });
        }
        if self.site.timeout_minutes == 0 {
            errors.push(ValidationError {
                field: "site.timeout_minutes".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.site.max_retries == 0 {
            errors.push(ValidationError {
                field: "site.max_retries".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- transfer ---
        if let Some(dir) = &self.transfer.staging_dir {
            if !dir.is_dir() {
                errors.push(ValidationError {
                    field: "transfer.staging_dir".into(),
                    message: format!("directory does not exist: {}", dir.display()),
                });
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Programmatic construction of a [`Config`], mainly for tests and embedding.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use spsync_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .site_url("https://contoso.sharepoint.com/sites/team")
///     .site_timeout_minutes(5)
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Starts from the defaults.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- site ---

    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.config.site.url = url.into();
        self
    }

    pub fn site_timeout_minutes(mut self, minutes: u64) -> Self {
        self.config.site.timeout_minutes = minutes;
        self
    }

    pub fn site_max_retries(mut self, n: u32) -> Self {
        self.config.site.max_retries = n;
        self
    }

    // --- transfer ---

    pub fn transfer_staging_dir(mut self, dir: PathBuf) -> Self {
        self.config.transfer.staging_dir = Some(dir);
        self
    }

    pub fn transfer_keep_staging(mut self, keep: bool) -> Self {
        self.config.transfer.keep_staging = keep;
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    pub fn build(self) -> Config {
        self.config
    }

    /// # Errors
    /// Returns every validation problem if the result is not usable.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
