use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

use crate::LogOption;

/// Default number of days rotated files are retained.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 7;
/// Default number of rotated files kept.
pub const DEFAULT_MAX_BACKUPS: i64 = 3;
/// Default size in megabytes at which the log file rotates.
pub const DEFAULT_MAX_SIZE_MB: i64 = 100;

/// Severity of a log record.
///
/// Ordered `Debug < Info < Warning < Error < Off`. `Off` is only meaningful
/// as a configured minimum: it disables a logger entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Off,
}

impl Level {
    /// Lowercase name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Off => "off",
        }
    }

    /// Minimum-severity filter for the formatter.
    pub fn as_level_filter(&self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Off => LevelFilter::OFF,
        }
    }

    /// Filter directive understood by `EnvFilter`.
    pub(crate) fn directive(&self) -> &'static str {
        match self {
            Self::Warning => "warn",
            other => other.as_str(),
        }
    }
}

impl From<&str> for Level {
    /// Lenient parse: unrecognized names fall back to `Info`.
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warning" | "warn" => Self::Warning,
            "error" => Self::Error,
            "off" => Self::Off,
            _ => Self::Info,
        }
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a [`Logger`](crate::Logger).
///
/// Values are stored exactly as given. Out-of-range rotation settings are
/// interpreted by [`RotationPolicy`](crate::RotationPolicy), never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum level to output
    pub level: Level,
    /// Path to the log file (`None` writes to stdout)
    pub output_file: Option<PathBuf>,
    /// Days to retain rotated files
    pub max_age_days: i64,
    /// Number of rotated files to retain
    pub max_backups: i64,
    /// Size in megabytes before the file is rotated
    pub max_size_mb: i64,
    /// Gzip rotated files
    pub compress: bool,
    /// Emit JSON records instead of text
    pub json_format: bool,
    /// Forward to the process default logger, ignoring output and format
    pub use_default: bool,
}

impl Config {
    /// Create a new Config with defaults
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            output_file: None,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            compress: false,
            json_format: false,
            use_default: false,
        }
    }

    /// Apply options in order. Later options win over earlier ones touching
    /// the same field.
    pub fn apply<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = LogOption>,
    {
        for option in options {
            option.apply(&mut self);
        }
        self
    }

    /// The log file path. `None` when unset or empty, both meaning stdout.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Whether records go to a file rather than stdout.
    pub fn is_file_backed(&self) -> bool {
        self.output_path().is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
