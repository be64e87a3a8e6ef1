//! Configuration for bazel-statter
//!
//! This module provides the command-line configuration: which build logs to
//! read, how to filter and sort the report, and logging options.

use std::path::PathBuf;

use clap::Parser;
use statter_aggregate::{ReportOptions, SortOrder};

/// Bazel Statter - flakiness and timing report across Bazel test logs
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "bazel-statter")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// First build number to read (inclusive)
    #[arg(short, long)]
    pub start: u32,

    /// Last build number to read (inclusive)
    #[arg(short, long)]
    pub end: u32,

    /// Directory holding one `<build>.txt` log per build
    #[arg(short = 'd', long, env = "STATTER_LOG_DIR", default_value = ".")]
    pub log_dir: PathBuf,

    /// Report order: name, failures, successes, longest or shortest
    #[arg(long, default_value = "name")]
    pub sort: SortOrder,

    /// Skip results that were served from cache
    #[arg(long, default_value = "false")]
    pub ignore_cached: bool,

    /// Also list targets that never failed
    #[arg(short, long, default_value = "false")]
    pub all: bool,

    /// Print the report as JSON instead of a table
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so the report on stdout stays clean.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Number of builds in the configured range
    #[must_use]
    pub fn build_count(&self) -> usize {
        if self.end < self.start {
            return 0;
        }
        (self.end - self.start) as usize + 1
    }

    /// Paths of the log files for every build in the range
    #[must_use]
    pub fn log_sources(&self) -> Vec<PathBuf> {
        (self.start..=self.end)
            .map(|build| self.log_dir.join(format!("{build}.txt")))
            .collect()
    }

    /// Report options derived from the flags
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            sort: self.sort,
            include_successful: self.all,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The start or end build is missing (zero) or the range is inverted
    /// - The log directory doesn't exist or isn't a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start == 0 || self.end == 0 || self.end < self.start {
            return Err(ConfigError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }

        if !self.log_dir.exists() {
            return Err(ConfigError::LogDirNotFound(self.log_dir.clone()));
        }
        if !self.log_dir.is_dir() {
            return Err(ConfigError::LogDirNotDirectory(self.log_dir.clone()));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Build range is empty, inverted, or missing a bound
    #[error("Invalid build range {start}..={end}: --start and --end are required and start must not exceed end")]
    InvalidRange {
        /// First build number given
        start: u32,
        /// Last build number given
        end: u32,
    },

    /// Log directory not found
    #[error("Log directory not found: {0}")]
    LogDirNotFound(PathBuf),

    /// Log directory path is not a directory
    #[error("Log directory is not a directory: {0}")]
    LogDirNotDirectory(PathBuf),
}
