//! Error types for the palisade-ingest crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Feed snapshot not found at path: {path}")]
    SnapshotNotFound { path: String },

    #[error("Failed to parse feed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] palisade_store::StoreError),

    #[error("Unknown holding category: {0}")]
    UnknownHoldingCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
