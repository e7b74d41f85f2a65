//! Turns a [`Config`] into the concrete output used by a logger.

use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::format::JsonRecord;
use crate::{Config, FileSink, Level, RotatingWriter, RotationPolicy};

/// Where a logger's records go.
#[derive(Debug)]
pub(crate) enum Pipeline {
    /// Level is off, nothing is written.
    Discard,
    /// Forward to the process default subscriber, or to stderr when none is
    /// installed.
    Process,
    /// A formatter owned by this logger.
    Owned { dispatch: Dispatch, json: bool },
}

/// A derived pipeline plus the file it writes to, if any.
#[derive(Debug)]
pub(crate) struct Derived {
    pub pipeline: Pipeline,
    pub file: Option<FileSink>,
}

/// Build the pipeline for a finalized configuration.
///
/// Precedence: an `Off` level discards everything, then `use_default`
/// forwards to the process default, otherwise the config's own output,
/// format and level are used.
pub(crate) fn derive(config: &Config) -> Derived {
    if config.level == Level::Off {
        return Derived {
            pipeline: Pipeline::Discard,
            file: None,
        };
    }
    if config.use_default {
        return Derived {
            pipeline: Pipeline::Process,
            file: None,
        };
    }

    let filter = EnvFilter::builder()
        .with_default_directive(config.level.as_level_filter().into())
        .parse_lossy("");
    let (dispatch, file) = build_output(config, filter);
    Derived {
        pipeline: Pipeline::Owned {
            dispatch,
            json: config.json_format,
        },
        file,
    }
}

/// Build a formatter for the config's output and format, filtered by `filter`.
///
/// A missing or empty output path means stdout.
pub(crate) fn build_output(config: &Config, filter: EnvFilter) -> (Dispatch, Option<FileSink>) {
    match config.output_path() {
        Some(path) => {
            let sink = FileSink::new(RotatingWriter::new(
                path,
                RotationPolicy::from_config(config),
            ));
            let dispatch = build_dispatch(config.json_format, filter, sink.clone(), false);
            (dispatch, Some(sink))
        }
        None => {
            let dispatch =
                build_dispatch(config.json_format, filter, std::io::stdout, cfg!(feature = "ansi"));
            (dispatch, None)
        }
    }
}

/// Text formatter on stderr at info, for process loggers with nothing
/// installed.
pub(crate) fn build_stderr_fallback() -> Dispatch {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::Info.as_level_filter().into())
        .parse_lossy("");
    build_dispatch(false, filter, std::io::stderr, cfg!(feature = "ansi"))
}

fn build_dispatch<W>(json: bool, filter: EnvFilter, writer: W, ansi: bool) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    if json {
        Dispatch::new(builder.event_format(JsonRecord).finish())
    } else {
        Dispatch::new(builder.finish())
    }
}
