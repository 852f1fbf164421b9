use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Per-file errors (`FileNotFound`, `PermissionDenied`, `ReadError`) are
/// isolated to the file they occurred on and never abort a multi-file run.
/// `SinkError` covers the optional secondary output file: a write failure
/// is logged and scanning continues; only a failure to create the sink at
/// startup is surfaced to the caller. Invalid byte sequences in scanned
/// files are not an error at all; they are replaced during decoding.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Error reading {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("Error writing output file {path}: {source}")]
    SinkError { path: PathBuf, source: io::Error },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn read_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn sink_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SinkError {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Maps an open/read error to the matching variant for `path`
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(path.into()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.into()),
            _ => Self::read_error(path, source),
        }
    }
}
