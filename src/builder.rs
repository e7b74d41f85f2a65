//! Builder pattern for configuring a logger.
//!
//! This module provides a fluent alternative to passing a list of
//! [`LogOption`]s, ending in either a [`Logger`] or the installation of the
//! process default logger.
//!
//! # Example
//!
//! ```rust,no_run
//! // A file-backed JSON logger
//! let logger = rotalog::builder()
//!     .with_level("debug")
//!     .with_output_file("/var/log/app.log")
//!     .with_max_backups(5)
//!     .with_json_format()
//!     .build();
//! logger.debug("ready", &[]);
//!
//! // The process default logger, on stdout
//! rotalog::builder()
//!     .with_level("info")
//!     .init()
//!     .expect("Failed to initialize logging");
//! ```

use crate::{Config, Level, LogOption, Logger, Result, init_default};
use std::path::PathBuf;

/// A builder for configuring a [`Logger`].
#[derive(Debug, Clone)]
pub struct LogBuilder {
    config: Config,
}

impl LogBuilder {
    /// Create a new LogBuilder with default configuration.
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    /// Create a LogBuilder from an existing configuration.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Apply an option.
    pub fn with_option(mut self, option: LogOption) -> Self {
        option.apply(&mut self.config);
        self
    }

    /// Set the log level ("debug", "info", "warning", "error" or "off").
    pub fn with_level(self, level: impl Into<Level>) -> Self {
        self.with_option(LogOption::Level(level.into()))
    }

    /// Write to a rotating log file instead of stdout.
    pub fn with_output_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_option(crate::with_output_file(path))
    }

    pub fn with_max_age(self, days: i64) -> Self {
        self.with_option(LogOption::MaxAgeDays(days))
    }

    pub fn with_max_backups(self, count: i64) -> Self {
        self.with_option(LogOption::MaxBackups(count))
    }

    pub fn with_max_size(self, size_mb: i64) -> Self {
        self.with_option(LogOption::MaxSizeMb(size_mb))
    }

    pub fn with_compression(self) -> Self {
        self.with_option(LogOption::Compress)
    }

    pub fn with_json_format(self) -> Self {
        self.with_option(LogOption::JsonFormat)
    }

    pub fn with_default_format(self) -> Self {
        self.with_option(LogOption::DefaultFormat)
    }

    /// Get the current configuration without building a logger.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a logger from the configured settings.
    pub fn build(self) -> Logger {
        Logger::from_config(self.config)
    }

    /// Install the configured settings as the process default logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a process default logger is already installed.
    pub fn init(self) -> Result<()> {
        init_default(&self.config, None)
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
