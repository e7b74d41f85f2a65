//! Configuration options.
//!
//! Each [`LogOption`] describes a single change to a draft [`Config`]. Options
//! are applied in order by [`Logger::new`](crate::Logger::new),
//! [`Logger::with_options`](crate::Logger::with_options) and
//! [`Config::apply`]; when two options touch the same field the last one wins.
//!
//! ```rust
//! use rotalog::{Config, Level, with_debug_level, with_json_format, with_max_age};
//!
//! let config = Config::new().apply([with_debug_level(), with_max_age(1), with_json_format()]);
//! assert_eq!(config.level, Level::Debug);
//! assert_eq!(config.max_age_days, 1);
//! assert_eq!(config.max_backups, 3);
//! ```

use std::path::PathBuf;

use crate::{Config, Level};

/// A single configuration change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOption {
    /// Set the minimum level.
    Level(Level),
    /// Write to a file, or to stdout when `None`.
    OutputFile(Option<PathBuf>),
    /// Days to retain rotated files.
    MaxAgeDays(i64),
    /// Number of rotated files to retain.
    MaxBackups(i64),
    /// Size in megabytes before rotation.
    MaxSizeMb(i64),
    /// Gzip rotated files.
    Compress,
    /// Emit JSON records.
    JsonFormat,
    /// Forward to the process default logger.
    DefaultFormat,
}

impl LogOption {
    /// Apply this option to a draft configuration.
    pub fn apply(&self, config: &mut Config) {
        match self {
            Self::Level(level) => config.level = *level,
            Self::OutputFile(path) => config.output_file = path.clone(),
            Self::MaxAgeDays(days) => config.max_age_days = *days,
            Self::MaxBackups(count) => config.max_backups = *count,
            Self::MaxSizeMb(size) => config.max_size_mb = *size,
            Self::Compress => config.compress = true,
            Self::JsonFormat => config.json_format = true,
            Self::DefaultFormat => config.use_default = true,
        }
    }
}

/// Set the minimum level for output.
pub fn with_level(level: impl Into<Level>) -> LogOption {
    LogOption::Level(level.into())
}

pub fn with_debug_level() -> LogOption {
    with_level(Level::Debug)
}

pub fn with_info_level() -> LogOption {
    with_level(Level::Info)
}

pub fn with_warning_level() -> LogOption {
    with_level(Level::Warning)
}

pub fn with_error_level() -> LogOption {
    with_level(Level::Error)
}

/// Disable all output except [`Logger::fatal`](crate::Logger::fatal).
pub fn with_level_off() -> LogOption {
    with_level(Level::Off)
}

/// Write to the given file. An empty path selects stdout.
pub fn with_output_file(path: impl Into<PathBuf>) -> LogOption {
    let path = path.into();
    if path.as_os_str().is_empty() {
        LogOption::OutputFile(None)
    } else {
        LogOption::OutputFile(Some(path))
    }
}

/// Days to retain rotated log files.
pub fn with_max_age(days: i64) -> LogOption {
    LogOption::MaxAgeDays(days)
}

/// Number of rotated log files to retain.
pub fn with_max_backups(count: i64) -> LogOption {
    LogOption::MaxBackups(count)
}

/// Size in megabytes before the log file is rotated.
pub fn with_max_size(size_mb: i64) -> LogOption {
    LogOption::MaxSizeMb(size_mb)
}

/// Gzip rotated log files.
pub fn with_compression() -> LogOption {
    LogOption::Compress
}

/// Emit newline-delimited JSON records.
pub fn with_json_format() -> LogOption {
    LogOption::JsonFormat
}

/// Forward to the process default logger. Takes precedence over output file
/// and format settings.
pub fn with_default_format() -> LogOption {
    LogOption::DefaultFormat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sequences() -> Vec<Vec<LogOption>> {
        vec![
            vec![],
            vec![with_debug_level()],
            vec![with_output_file("a.log"), with_max_size(5)],
            vec![with_json_format(), with_compression(), with_level_off()],
            vec![with_max_backups(-2), with_max_age(0), with_default_format()],
            vec![with_error_level(), with_output_file(""), with_warning_level()],
        ]
    }

    #[test]
    fn test_each_option_sets_its_field() {
        let config = Config::new().apply([
            with_level("error"),
            with_output_file("app.log"),
            with_max_age(30),
            with_max_backups(10),
            with_max_size(1),
            with_compression(),
            with_json_format(),
            with_default_format(),
        ]);
        assert_eq!(config.level, Level::Error);
        assert_eq!(config.output_file, Some(PathBuf::from("app.log")));
        assert_eq!(config.max_age_days, 30);
        assert_eq!(config.max_backups, 10);
        assert_eq!(config.max_size_mb, 1);
        assert!(config.compress);
        assert!(config.json_format);
        assert!(config.use_default);
    }

    #[test]
    fn test_last_write_wins() {
        let config = Config::new().apply([with_debug_level(), with_error_level()]);
        assert_eq!(config.level, Level::Error);

        let config = Config::new().apply([with_output_file("a.log"), with_output_file("b.log")]);
        assert_eq!(config.output_file, Some(PathBuf::from("b.log")));
    }

    #[test]
    fn test_empty_output_file_selects_stdout() {
        let config = Config::new().apply([with_output_file("a.log"), with_output_file("")]);
        assert!(config.output_file.is_none());
        assert!(!config.is_file_backed());
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        let config = Config::new().apply([with_max_size(-1), with_max_age(-5), with_max_backups(0)]);
        assert_eq!(config.max_size_mb, -1);
        assert_eq!(config.max_age_days, -5);
        assert_eq!(config.max_backups, 0);
    }

    #[test]
    fn test_application_is_idempotent() {
        for seq in sample_sequences() {
            let once = Config::new().apply(seq.clone());
            let twice = once.clone().apply(seq.clone());
            assert_eq!(once, twice, "sequence {:?}", seq);
        }
    }

    #[test]
    fn test_application_composes() {
        for a in sample_sequences() {
            for b in sample_sequences() {
                let joined: Vec<LogOption> = a.iter().chain(b.iter()).cloned().collect();
                let at_once = Config::new().apply(joined);
                let staged = Config::new().apply(a.clone()).apply(b.clone());
                assert_eq!(at_once, staged, "a={:?} b={:?}", a, b);
            }
        }
    }
}
