//! Error types for catalog loading

use thiserror::Error;

/// Reasons a catalog fetch can fail. Callers treat all of them the same way:
/// log and keep whatever collection they already had.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Endpoint returned status {0}")]
    StatusError(u16),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
