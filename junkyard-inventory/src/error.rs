use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory file {path:?} is corrupt: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("file operation failed: {0}")]
    FileOperationFailed(#[from] std::io::Error),
    #[error("invalid glob {0:?}: {1}")]
    InvalidGlob(String, #[source] globset::Error),
    #[error("path {0:?} has no file name")]
    InvalidPath(PathBuf),
    #[error("invalid pattern {0:?}: {1}")]
    InvalidPattern(String, #[source] regex::Error),
    #[error("serializing inventory failed: {0}")]
    SerializationFailed(#[source] serde_json::Error),
}
