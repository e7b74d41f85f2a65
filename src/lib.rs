//! # Rotalog
//!
//! A logging facade with level filtering, text/JSON output and rotating log
//! files.
//!
//! ## Features
//!
//! - Leveled logging (`debug` < `info` < `warning` < `error` < `off`) with
//!   structured key/value fields
//! - Human-readable text or newline-delimited JSON records
//! - Size based log rotation with backup count and age limits, optional gzip
//! - Built on the `tracing` ecosystem
//!
//! ## Example
//!
//! ```rust
//! use rotalog::{Logger, with_debug_level, with_json_format};
//!
//! let logger = Logger::new([with_debug_level(), with_json_format()]);
//! logger.info("Application started", &[("version", &"1.0.0")]);
//!
//! // derive a quieter logger; `logger` is unchanged
//! let quiet = logger.with_options([rotalog::with_error_level()]);
//! assert!(!quiet.is_info_enabled());
//! assert!(logger.is_debug_enabled());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod fields;
mod format;
pub mod logger;
pub mod options;
mod pipeline;
pub mod rotation;
pub mod tracing_init;
pub mod writer;

pub use builder::LogBuilder;
pub use config::{Config, Level};
pub use error::{Error, Result};
pub use fields::{Field, FieldValue};
pub use logger::Logger;
pub use options::{
    LogOption, with_compression, with_debug_level, with_default_format, with_error_level,
    with_info_level, with_json_format, with_level, with_level_off, with_max_age,
    with_max_backups, with_max_size, with_output_file, with_warning_level,
};
pub use rotation::RotationPolicy;
pub use tracing_init::init_default;
pub use writer::{FileSink, RotatingWriter};

/// Start configuring a logger with the builder API.
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
