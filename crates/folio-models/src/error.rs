//! Model error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for manifest operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while loading or validating a manifest.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid manifest: {0}")]
    Invalid(#[from] ManifestViolation),
}

/// A single manifest invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestViolation {
    #[error("duplicate id {0}")]
    DuplicateId(String),

    #[error("record {0} has an empty title")]
    EmptyTitle(String),

    #[error("record {0} has an empty category")]
    EmptyCategory(String),

    #[error("record {0} uses the reserved category \"All\"")]
    ReservedCategory(String),
}
