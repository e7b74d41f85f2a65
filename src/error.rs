use thiserror::Error as ThisError;

/// Errors that can occur in the logging library
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed, e.g. while releasing a log file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Installing the process default logger failed.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
