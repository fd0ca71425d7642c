//! Reconciliation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Failed to read media folder {path}: {source}")]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to write merged output over the manifest itself: {0}")]
    OutputIsManifest(PathBuf),

    #[error("Failed to render report: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
