use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{op} failed for {path}: {source}")]
    IoPath {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("access denied - path outside allowed directories: {path} not in {allowed}")]
    PathOutsideAllowed { path: PathBuf, allowed: String },

    #[error("access denied - symlink target outside allowed directories: {path} not in {allowed}")]
    SymlinkOutsideAllowed { path: PathBuf, allowed: String },

    /// Containment checks require absolute inputs after normalization; hitting
    /// this is a caller bug, never a routine deny.
    #[error("path must be absolute after normalization: {0}")]
    NotAbsolute(PathBuf),

    #[error("invalid allowed directory: {0}")]
    InvalidRoot(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid utf-8 in file: {0}")]
    InvalidUtf8(PathBuf),

    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

impl Error {
    pub(crate) fn io_path(
        op: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::IoPath {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
