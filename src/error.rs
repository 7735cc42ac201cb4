//! Centralized error types for vnt2txt.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the vnt2txt library.
#[derive(Error, Debug)]
pub enum VntError {
    /// Fewer than the two required positional arguments were given.
    #[error("Missing arguments: an input directory and an output directory are required")]
    MissingArguments,

    /// The input directory does not exist.
    #[error("Input directory {0} does not exist")]
    InputDirectoryNotFound(PathBuf),

    /// A `DCREATED` / `LAST-MODIFIED` value does not match `YYYYMMDDTHHMMSS`.
    #[error("Malformed {field} timestamp: '{value}'")]
    MalformedTimestamp { field: &'static str, value: String },

    /// The `BODY;...:` line does not have the supported shape.
    #[error("Malformed BODY field: {0}")]
    MalformedBodyField(String),

    /// The declared charset is not a known encoding label.
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// The body is not valid quoted-printable, or its bytes are invalid in the charset.
    #[error("Invalid encoded data: {0}")]
    InvalidEncodedData(String),

    /// Another note converted in this run already produced this output file.
    #[error("Output file already written in this run: {0}")]
    OutputCollision(PathBuf),

    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("Directory walk error: {0}")]
    Walk(String),
}

/// Convenience alias for `Result<T, VntError>`.
pub type Result<T> = std::result::Result<T, VntError>;

impl VntError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<walkdir::Error> for VntError {
    fn from(err: walkdir::Error) -> Self {
        match err.path().map(PathBuf::from) {
            Some(path) if err.io_error().is_some() => {
                let message = err.to_string();
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other(message));
                Self::Io { path, source }
            }
            _ => Self::Walk(err.to_string()),
        }
    }
}
