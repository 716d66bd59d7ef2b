//! In-memory key-value store.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use moviesync_core::keyvalue::{partition_key, sort_key, Item, KeyValueStore, Result, StoreError};

/// Key-value store backed by a `BTreeMap` keyed by `(PK, SK)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    items: Arc<RwLock<BTreeMap<(String, String), Item>>>,
    failing_partitions: Arc<RwLock<HashSet<String>>>,
    batch_sizes: Arc<RwLock<Vec<usize>>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later query of `partition_key` fail.
    pub async fn fail_partition(&self, partition_key: &str) {
        self.failing_partitions
            .write()
            .await
            .insert(partition_key.to_string());
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Sizes of the `batch_put` calls received so far.
    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.read().await.clone()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn scan_prefix(&self, attribute: &str, prefix: &str) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| {
                item.get(attribute)
                    .and_then(Value::as_str)
                    .is_some_and(|value| value.starts_with(prefix))
            })
            .cloned()
            .collect())
    }

    /// Rejects a batch repeating a key, as `BatchWriteItem` does.
    async fn batch_put(&self, items: Vec<Item>) -> Result<()> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut keyed = Vec::with_capacity(items.len());
        for item in items {
            let key = match (partition_key(&item), sort_key(&item)) {
                (Some(pk), Some(sk)) => (pk.to_string(), sk.to_string()),
                _ => {
                    return Err(StoreError::WriteFailed(
                        "Item is missing its key attributes".to_string(),
                    ))
                }
            };
            if !seen.insert(key.clone()) {
                return Err(StoreError::WriteFailed(
                    "Provided list of item keys contains duplicates".to_string(),
                ));
            }
            keyed.push((key, item));
        }

        self.batch_sizes.write().await.push(keyed.len());
        self.items.write().await.extend(keyed);
        Ok(())
    }

    async fn query_partition(&self, partition_key: &str) -> Result<Vec<Item>> {
        if self.failing_partitions.read().await.contains(partition_key) {
            return Err(StoreError::QueryFailed(format!(
                "Query of {partition_key} failed"
            )));
        }

        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|((pk, _), _)| pk == partition_key)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn get(&self, partition_key: &str, sort_key: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items
            .get(&(partition_key.to_string(), sort_key.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items(values: Vec<Value>) -> Vec<Item> {
        values
            .into_iter()
            .filter_map(|value| value.as_object().cloned())
            .collect()
    }

    #[tokio::test]
    async fn test_batch_put_rejects_repeated_key() {
        let store = InMemoryKeyValueStore::new();
        let batch = items(vec![
            json!({"PK": "META#GENRE", "SK": "GENRE#Drama"}),
            json!({"PK": "META#GENRE", "SK": "GENRE#Drama"}),
            json!({"PK": "META#GENRE", "SK": "GENRE#Comedy"}),
        ]);

        assert!(matches!(
            store.batch_put(batch).await,
            Err(StoreError::WriteFailed(_))
        ));
        assert_eq!(store.len().await, 0);
        assert!(store.batch_sizes().await.is_empty());
    }

    #[tokio::test]
    async fn test_batch_put_overwrites_across_calls() {
        let store = InMemoryKeyValueStore::new();
        store
            .batch_put(items(vec![json!({"PK": "A", "SK": "A", "n": 1})]))
            .await
            .unwrap();
        store
            .batch_put(items(vec![json!({"PK": "A", "SK": "A", "n": 2})]))
            .await
            .unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("A", "A").await.unwrap().unwrap()["n"], 2);
    }
}
