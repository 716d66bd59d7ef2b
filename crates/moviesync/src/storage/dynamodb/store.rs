//! DynamoDB store implementation.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;

use moviesync_core::keyvalue::keys::{PARTITION_KEY, SORT_KEY};
use moviesync_core::keyvalue::{Item, KeyValueStore, Result, StoreError};

use super::conversions::{attributes_to_item, item_to_attributes, string_attribute};
use super::error::{map_batch_write_error, map_get_item_error, map_query_error, map_scan_error};

/// Maximum requests per `BatchWriteItem` call.
pub const BATCH_WRITE_SIZE: usize = 25;

/// Sends of one chunk before unprocessed items become an error.
pub const MAX_WRITE_ATTEMPTS: usize = 5;

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(100);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Single-table DynamoDB store.
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Sends one chunk, re-sending whatever the service leaves unprocessed.
    async fn write_chunk(&self, mut requests: Vec<WriteRequest>) -> Result<()> {
        let mut attempt = 1;

        loop {
            let output = self
                .client
                .batch_write_item()
                .request_items(&self.table_name, requests)
                .send()
                .await
                .map_err(map_batch_write_error)?;

            requests = output
                .unprocessed_items
                .and_then(|mut tables| tables.remove(&self.table_name))
                .unwrap_or_default();

            if requests.is_empty() {
                return Ok(());
            }

            if attempt >= MAX_WRITE_ATTEMPTS {
                return Err(StoreError::UnprocessedItems {
                    count: requests.len(),
                    attempts: attempt,
                });
            }

            let delay = retry_delay(attempt);
            tracing::debug!(
                unprocessed = requests.len(),
                attempt,
                delay_ms = delay.as_millis() as u64,
                "Retrying unprocessed items"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Backoff before retry number `retry` (1-based): 100ms, 200ms, 400ms, ...
/// capped at 2s.
pub fn retry_delay(retry: usize) -> Duration {
    let exponent = u32::try_from(retry.saturating_sub(1)).unwrap_or(u32::MAX);
    let factor = 1u32.checked_shl(exponent).unwrap_or(u32::MAX);
    INITIAL_RETRY_DELAY
        .saturating_mul(factor)
        .min(MAX_RETRY_DELAY)
}

#[async_trait]
impl KeyValueStore for DynamoDbStore {
    async fn scan_prefix(&self, attribute: &str, prefix: &str) -> Result<Vec<Item>> {
        let mut pages = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("begins_with(#attr, :prefix)")
            .expression_attribute_names("#attr", attribute)
            .expression_attribute_values(":prefix", string_attribute(prefix))
            .into_paginator()
            .items()
            .send();

        let mut items = Vec::new();
        while let Some(attributes) = pages.next().await {
            let attributes = attributes.map_err(map_scan_error)?;
            items.push(attributes_to_item(attributes)?);
        }

        Ok(items)
    }

    async fn batch_put(&self, items: Vec<Item>) -> Result<()> {
        let mut requests = Vec::with_capacity(items.len());
        for item in &items {
            let put = PutRequest::builder()
                .set_item(Some(item_to_attributes(item)?))
                .build()
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            requests.push(WriteRequest::builder().put_request(put).build());
        }

        for chunk in requests.chunks(BATCH_WRITE_SIZE) {
            self.write_chunk(chunk.to_vec()).await?;
        }

        Ok(())
    }

    async fn query_partition(&self, partition_key: &str) -> Result<Vec<Item>> {
        let mut pages = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", PARTITION_KEY)
            .expression_attribute_values(":pk", string_attribute(partition_key))
            .into_paginator()
            .items()
            .send();

        let mut items = Vec::new();
        while let Some(attributes) = pages.next().await {
            let attributes = attributes.map_err(map_query_error)?;
            items.push(attributes_to_item(attributes)?);
        }

        Ok(items)
    }

    async fn get(&self, partition_key: &str, sort_key: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, string_attribute(partition_key))
            .key(SORT_KEY, string_attribute(sort_key))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, partition_key))?;

        match result.item {
            Some(attributes) => Ok(Some(attributes_to_item(attributes)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles_then_caps() {
        assert_eq!(retry_delay(1), Duration::from_millis(100));
        assert_eq!(retry_delay(2), Duration::from_millis(200));
        assert_eq!(retry_delay(4), Duration::from_millis(800));
        assert_eq!(retry_delay(5), Duration::from_millis(1600));
        assert_eq!(retry_delay(6), Duration::from_secs(2));
        assert_eq!(retry_delay(64), Duration::from_secs(2));
    }
}
