use thiserror::Error;

/// Errors raised while loading or reading the source dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset top level must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Dataset has no '{0}' key")]
    MissingCategory(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
