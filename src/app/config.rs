//! TOML configuration file parsing and loading
//!
//! The configuration names the projects to watch, the external checkers to
//! delegate analysis to, logging defaults and the refresh interval.
//!
//! ```toml
//! refresh_seconds = 60
//!
//! [logging]
//! level = "info"
//! format = "text"
//!
//! [[checker]]
//! kind = "hg"
//! program = "crystal-hg-check"
//!
//! [[project]]
//! name = "crystal"
//! environment = { name = "me", location = "/home/me/crystal", kind = "hg" }
//! peers = [{ name = "alice", location = "ssh://host//alice/crystal", kind = "hg" }]
//! ```

use crate::analysis::api::{CheckerRegistry, ProcessChecker};
use crate::core::logging::LogFormat;
use crate::model::{Preferences, RepoKind};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("no configuration file given and none found at the default location")]
    NoConfigFile,

    #[error("error reading configuration file {}: {cause}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("error parsing configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            message: message.into(),
        }
    }
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
    pub file: Option<PathBuf>,
}

/// External program registered as the checker for one repository kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    pub kind: RepoKind,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubConfig {
    /// Seconds between refresh rounds; absent means run once
    #[serde(default)]
    pub refresh_seconds: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default, rename = "checker")]
    pub checkers: Vec<CheckerConfig>,

    #[serde(default, rename = "project")]
    pub projects: Preferences,
}

impl HubConfig {
    /// Default configuration path: `<config dir>/Repostate/repostate.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Repostate").join("repostate.toml"))
    }

    /// Load and validate the configuration
    ///
    /// An explicitly given file must exist; otherwise the default path is used
    /// if present.
    pub async fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_file {
            Some(path) if path.exists() => path.to_path_buf(),
            Some(path) => {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Err(ConfigError::NoConfigFile),
            },
        };

        log::debug!("Loading configuration from {}", path.display());
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|cause| ConfigError::Read {
                path: path.clone(),
                cause,
            })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: HubConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projects.is_empty() {
            return Err(ConfigError::invalid("at least one [[project]] is required"));
        }

        if self.refresh_seconds == Some(0) {
            return Err(ConfigError::invalid("refresh_seconds must be greater than 0"));
        }

        let mut environments = HashSet::new();
        for project in self.projects.projects() {
            if !environments.insert(&project.environment) {
                return Err(ConfigError::invalid(format!(
                    "environment {} is used by more than one project",
                    project.environment
                )));
            }
            if project.peers.contains(&project.environment) {
                return Err(ConfigError::invalid(format!(
                    "project '{}' lists its own environment as a peer",
                    project.name
                )));
            }
        }

        let mut kinds = HashSet::new();
        for checker in &self.checkers {
            if checker.program.trim().is_empty() {
                return Err(ConfigError::invalid(format!(
                    "checker for {} has an empty program",
                    checker.kind
                )));
            }
            if !kinds.insert(checker.kind) {
                return Err(ConfigError::invalid(format!(
                    "more than one checker configured for {}",
                    checker.kind
                )));
            }
        }

        Ok(())
    }

    /// Checker registry with one process checker per configured kind
    pub fn build_registry(&self) -> CheckerRegistry {
        self.checkers
            .iter()
            .fold(CheckerRegistry::new(), |registry, checker| {
                registry.with_checker(
                    checker.kind,
                    Arc::new(ProcessChecker::new(
                        checker.program.clone(),
                        checker.args.clone(),
                    )),
                )
            })
    }

    /// Log level to run with; `cli_level` wins over the file, `info` is the default
    pub fn log_level(&self, cli_level: Option<&str>) -> String {
        cli_level
            .or(self.logging.level.as_deref())
            .unwrap_or("info")
            .to_string()
    }

    /// Delay between refresh rounds; `cli_interval` wins over the file
    pub fn refresh_interval(&self, cli_interval: Option<u64>) -> Option<Duration> {
        cli_interval
            .or(self.refresh_seconds)
            .map(Duration::from_secs)
    }
}
