//! Command-line arguments
//!
//! Values given here override the configuration file.

use crate::core::logging::LogFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report layout printed after each refresh round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "repostate")]
#[command(about = "Watch how collaborators' repositories relate to your own")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Color output control:
    /// --color forces color, --no-color disables it, unspecified = auto (TTY)
    #[arg(short = 'g', long = "color", conflicts_with = "no_color")]
    pub color: bool,

    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level or flexi_logger spec
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,

    /// Run a single refresh round and exit
    #[arg(long = "once", conflicts_with = "interval")]
    pub once: bool,

    /// Seconds between refresh rounds (overrides refresh_seconds)
    #[arg(short = 'i', long = "interval", value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Report format
    #[arg(long = "output", value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    value
        .parse::<LogFormat>()
        .map_err(|_| format!("'{}' is not one of: text, ext, json", value))
}

impl Args {
    /// Whether to color output, given whether stdout is a terminal
    pub fn use_color(&self, is_terminal: bool) -> bool {
        !self.no_color && (self.color || is_terminal)
    }
}
