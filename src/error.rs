//! Error types shared by the walker, the reporter and the CLI

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Every failure is fatal to the run; the CLI prints it and exits non-zero.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot access '{}': {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read link '{}': {source}", path.display())]
    LinkResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("out of memory")]
    OutOfMemory,

    #[error("error writing output: {0}")]
    Output(#[source] io::Error),

    #[error("error encoding entry: {0}")]
    Json(#[from] serde_json::Error),
}

impl SearchError {
    pub fn traversal(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SearchError::Traversal {
            path: path.into(),
            source,
        }
    }
}

impl From<std::collections::TryReserveError> for SearchError {
    fn from(_: std::collections::TryReserveError) -> Self {
        SearchError::OutOfMemory
    }
}
