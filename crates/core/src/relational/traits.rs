use async_trait::async_trait;
use thiserror::Error;

use super::MovieRow;

/// Errors from the relational store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowStoreError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Statement failed: {0}")]
    Statement(String),
}

pub type Result<T> = std::result::Result<T, RowStoreError>;

/// Target of the relational load.
#[async_trait]
pub trait MovieRowStore: Send + Sync {
    /// Creates the `movies` table when it does not exist.
    async fn ensure_schema(&self) -> Result<()>;

    /// Inserts or overwrites rows keyed by `movie_id`, all or nothing.
    ///
    /// On conflict every non-key column takes the incoming value; the
    /// insertion timestamp keeps the time of the first write. Returns the
    /// number of rows written.
    async fn upsert_movies(&self, rows: &[MovieRow]) -> Result<u64>;
}
