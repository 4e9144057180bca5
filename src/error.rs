//! Error types for Holocron
//!
//! Every fetch failure is surfaced verbatim to the caller; there is no
//! automatic retry or backoff anywhere in the crate.

use thiserror::Error;

/// Main error type for Holocron operations
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request to catalog service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog service reported errors: {0}")]
    Remote(String),

    #[error("catalog response is missing the '{0}' payload")]
    MissingData(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported export format '{0}' (expected json or csv)")]
    UnsupportedFormat(String),
}

/// Result type alias for Holocron operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// True if this failure came from the fetch path and the same call
    /// may be retried with the last-known cursor.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            CatalogError::Http(_) | CatalogError::Remote(_) | CatalogError::MissingData(_)
        )
    }
}
