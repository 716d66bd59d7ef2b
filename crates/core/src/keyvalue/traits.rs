use async_trait::async_trait;

use super::{Item, Result};

/// Minimal surface of a single-table key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns every item whose `attribute` is a string starting with
    /// `prefix`. Implementations follow pagination to the end.
    async fn scan_prefix(&self, attribute: &str, prefix: &str) -> Result<Vec<Item>>;

    /// Writes all items, overwriting any stored item with the same key.
    /// Keys must be unique within one call (see `fold_by_key`). Chunking and
    /// retry of partial writes are the implementation's concern.
    async fn batch_put(&self, items: Vec<Item>) -> Result<()>;

    /// Returns every item in a partition.
    async fn query_partition(&self, partition_key: &str) -> Result<Vec<Item>>;

    /// Gets a single item by its full key.
    async fn get(&self, partition_key: &str, sort_key: &str) -> Result<Option<Item>>;
}
