use std::path::PathBuf;

use thiserror::Error;

/// Failures at the resource-load boundary. Everything past loading works
/// on validated in-memory data and has no error cases.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}
