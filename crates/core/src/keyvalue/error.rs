use thiserror::Error;

/// Errors that can occur during key-value store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Write failed: {0}")]
    WriteFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("{count} items still unprocessed after {attempts} attempts")]
    UnprocessedItems { count: usize, attempts: usize },
}

/// Result type for key-value store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_query_failed_display() {
        let error = StoreError::QueryFailed("Table not found".to_string());
        assert_eq!(error.to_string(), "Query failed: Table not found");
    }

    #[test]
    fn test_store_error_unprocessed_display() {
        let error = StoreError::UnprocessedItems {
            count: 3,
            attempts: 5,
        };
        assert_eq!(
            error.to_string(),
            "3 items still unprocessed after 5 attempts"
        );
    }
}
