use once_cell::sync::{Lazy, OnceCell};
use tracing::Dispatch;
use tracing::subscriber::NoSubscriber;
use tracing_subscriber::EnvFilter;

use crate::pipeline::{build_output, build_stderr_fallback};
use crate::{Config, Error, Result};

/// Configuration of the installed process default logger.
static PROCESS_DEFAULT: OnceCell<Config> = OnceCell::new();

/// Receives process default records while nothing is installed.
static STDERR_FALLBACK: Lazy<Dispatch> = Lazy::new(build_stderr_fallback);

/// Install the process-wide default logger.
///
/// Output, format and rotation follow `config` (its `use_default` flag is
/// ignored). The level comes from `RUST_LOG` when set, then from the CLI
/// verbosity, then from `config.level`. Can succeed only once per process.
pub fn init_default(config: &Config, cli_verbose: Option<u8>) -> Result<()> {
    let log_spec = effective_log_spec(config, cli_verbose);
    let env_filter = EnvFilter::try_new(&log_spec).map_err(|e| Error::Init(e.to_string()))?;

    let (dispatch, _file) = build_output(config, env_filter);
    tracing::dispatcher::set_global_default(dispatch).map_err(|e| Error::Init(e.to_string()))?;

    let installed = Config {
        use_default: true,
        ..config.clone()
    };
    PROCESS_DEFAULT
        .set(installed)
        .map_err(|_| Error::Init("process default logger already installed".to_string()))?;

    tracing::debug!(spec = %log_spec, "process default logger installed");
    Ok(())
}

/// Config of the installed process default logger, if any.
pub(crate) fn process_default_config() -> Option<&'static Config> {
    PROCESS_DEFAULT.get()
}

/// Run `f` against the process default logger.
///
/// That is the current `tracing` dispatcher (thread-scoped or global). When
/// there is none, records go to stderr at info instead of being dropped.
pub(crate) fn with_process_default<T>(f: impl FnOnce() -> T) -> T {
    if process_default_missing() {
        tracing::dispatcher::with_default(&STDERR_FALLBACK, f)
    } else {
        f()
    }
}

fn process_default_missing() -> bool {
    tracing::dispatcher::get_default(|current| current.is::<NoSubscriber>())
}

/// Determine the effective filter directive, considering config and CLI overrides.
fn effective_log_spec(config: &Config, cli_verbose: Option<u8>) -> String {
    // RUST_LOG takes precedence over everything
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    match cli_verbose {
        None | Some(0) => config.level.directive().to_string(),
        Some(1) => "debug".to_string(),
        Some(_) => "trace".to_string(),
    }
}
