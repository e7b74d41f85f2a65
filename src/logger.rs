//! The logger facade.
//!
//! A [`Logger`] is derived from a [`Config`] once and never reconfigured in
//! place; [`Logger::with_options`] builds a new, independent logger instead.
//!
//! ```rust,no_run
//! use rotalog::{Logger, with_info_level, with_json_format, with_output_file};
//!
//! let logger = Logger::new([
//!     with_info_level(),
//!     with_output_file("logs/app.log"),
//!     with_json_format(),
//! ]);
//! logger.info("Application started", &[("version", &"1.0.0")]);
//! logger.close()?;
//! # Ok::<(), rotalog::Error>(())
//! ```

use crate::fields::KeyValues;
use crate::pipeline::{self, Derived, Pipeline};
use crate::tracing_init::{process_default_config, with_process_default};
use crate::{Config, Field, FileSink, Level, LogOption, Result};

/// Exit status used by [`Logger::fatal`].
const FATAL_EXIT_CODE: i32 = 1;

macro_rules! event_at {
    ($lvl:expr, $json:expr, $msg:expr, $kv:expr) => {
        if $kv.is_empty() {
            tracing::event!($lvl, "{}", $msg)
        } else if $json {
            tracing::event!($lvl, fields = tracing::field::display($kv.to_json()), "{}", $msg)
        } else {
            tracing::event!($lvl, "{} {}", $msg, $kv)
        }
    };
}

/// Leveled logger writing to stdout, a rotating file, or the process default.
#[derive(Debug)]
pub struct Logger {
    config: Config,
    disabled: bool,
    pipeline: Pipeline,
    /// File output, if any. Its lock serializes opening, rotating, writing
    /// and releasing the file.
    file: Option<FileSink>,
}

impl Logger {
    /// Create a logger from the defaults with `options` applied in order.
    ///
    /// Defaults: level info, stdout, text format, rotation at 100 MB keeping
    /// 3 backups for 7 days.
    pub fn new<I>(options: I) -> Self
    where
        I: IntoIterator<Item = LogOption>,
    {
        Self::from_config(Config::new().apply(options))
    }

    /// Create a logger for a finalized configuration.
    pub fn from_config(config: Config) -> Self {
        let Derived { pipeline, file } = pipeline::derive(&config);
        Self {
            disabled: config.level == Level::Off,
            config,
            pipeline,
            file,
        }
    }

    /// A logger that forwards to the process default logger.
    ///
    /// Unlike [`Logger::new`] this takes no options: output and format are
    /// whatever [`init_default`](crate::init_default) installed. Until then
    /// records go to stderr at info.
    pub fn process_default() -> Self {
        let config = process_default_config().cloned().unwrap_or_else(|| Config {
            use_default: true,
            ..Config::new()
        });

        Self {
            disabled: false,
            config,
            pipeline: Pipeline::Process,
            file: None,
        }
    }

    /// Build a new logger from this logger's configuration plus `options`.
    ///
    /// This logger and its output stay untouched. A file-backed result opens
    /// its own handle to the file.
    pub fn with_options<I>(&self, options: I) -> Self
    where
        I: IntoIterator<Item = LogOption>,
    {
        Self::from_config(self.config.clone().apply(options))
    }

    /// Flush and release the log file. No-op for stdout and process loggers.
    pub fn close(&self) -> Result<()> {
        match &self.file {
            Some(sink) => Ok(sink.close()?),
            None => Ok(()),
        }
    }

    pub fn debug(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Debug, msg, fields);
    }

    pub fn info(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Info, msg, fields);
    }

    pub fn warning(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Warning, msg, fields);
    }

    pub fn error(&self, msg: &str, fields: &[Field<'_>]) {
        self.log(Level::Error, msg, fields);
    }

    /// Log at error level, then exit the process with status 1.
    ///
    /// Never suppressed: a disabled logger sends the record to the process
    /// default logger instead, or to stderr when none is installed.
    pub fn fatal(&self, msg: &str, fields: &[Field<'_>]) -> ! {
        let kv = KeyValues(fields);
        match &self.pipeline {
            Pipeline::Owned { dispatch, json } => {
                tracing::dispatcher::with_default(dispatch, || emit(Level::Error, *json, msg, &kv))
            }
            Pipeline::Process | Pipeline::Discard => {
                with_process_default(|| emit(Level::Error, false, msg, &kv))
            }
        }
        if let Err(e) = self.close() {
            eprintln!("rotalog: failed to close log file before exit: {}", e);
        }
        std::process::exit(FATAL_EXIT_CODE)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn is_warning_enabled(&self) -> bool {
        self.is_enabled(Level::Warning)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    /// Whether a record at `level` would be emitted.
    pub fn is_enabled(&self, level: Level) -> bool {
        !self.disabled && level != Level::Off && self.config.level <= level
    }

    /// The configured minimum level.
    pub fn level(&self) -> Level {
        self.config.level
    }

    /// A copy of the configuration this logger was derived from.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    fn log(&self, level: Level, msg: &str, fields: &[Field<'_>]) {
        if self.disabled {
            return;
        }
        let kv = KeyValues(fields);
        match &self.pipeline {
            Pipeline::Discard => {}
            Pipeline::Process => with_process_default(|| emit(level, false, msg, &kv)),
            Pipeline::Owned { dispatch, json } => {
                tracing::dispatcher::with_default(dispatch, || emit(level, *json, msg, &kv))
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

/// Emit one event to the current dispatcher.
fn emit(level: Level, json: bool, msg: &str, kv: &KeyValues<'_>) {
    match level {
        Level::Debug => event_at!(tracing::Level::DEBUG, json, msg, kv),
        Level::Info => event_at!(tracing::Level::INFO, json, msg, kv),
        Level::Warning => event_at!(tracing::Level::WARN, json, msg, kv),
        Level::Error => event_at!(tracing::Level::ERROR, json, msg, kv),
        Level::Off => {}
    }
}
