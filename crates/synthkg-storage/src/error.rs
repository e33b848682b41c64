use std::path::PathBuf;
use synthkg_datasets::DatasetError;
use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encode/decode failed: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot on disk belongs to a different dataset family than the
    /// one it is being restored as.
    #[error("snapshot kind mismatch: expected `{expected}`, found `{found}`")]
    KindMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("malformed explanation file {path}: {reason}")]
    MalformedExplanations { path: PathBuf, reason: String },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
