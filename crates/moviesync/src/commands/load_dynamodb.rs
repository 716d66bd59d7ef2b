//! `moviesync load-dynamodb`

use std::path::Path;

use anyhow::{Context, Result};
use moviesync_core::dataset::{identifier, Category, Dataset};
use moviesync_core::keyvalue::keys::{actor_key, movie_key, GENRE_PARTITION};
use moviesync_core::keyvalue::{dataset_items, fold_by_key, Item, KeyValueStore};

use crate::config::AwsSettings;
use crate::storage::dynamodb::DynamoDbStore;

/// Items handed to the store per `batch_put` call.
pub const WRITE_BUFFER_SIZE: usize = 500;

/// Genre items echoed after the load.
const GENRE_SAMPLE_SIZE: usize = 5;

/// What the read-back found.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Verification {
    /// `None` when the genre query failed.
    pub genres: Option<usize>,
    pub actor: Option<(String, usize)>,
    pub movie: Option<(String, usize)>,
}

pub async fn run(aws: &AwsSettings, data: &Path) -> Result<()> {
    let dataset = Dataset::from_path(data)
        .with_context(|| format!("Failed to load dataset from {}", data.display()))?;

    let client = moviesync::aws::create_client(aws.client_target()).await;
    let store = DynamoDbStore::new(client, &aws.table_name);
    tracing::info!(table = %aws.target_display(), "Loading {}", data.display());

    write_items(&store, &dataset).await?;
    verify(&store, &dataset).await?;
    Ok(())
}

/// Streams every dataset item into the store in buffers of
/// `WRITE_BUFFER_SIZE`. Items repeating a key within a buffer are folded,
/// last one wins. Returns the number of items written.
pub async fn write_items(store: &dyn KeyValueStore, dataset: &Dataset) -> Result<usize> {
    let mut buffer: Vec<Item> = Vec::with_capacity(WRITE_BUFFER_SIZE);
    let mut written = 0;

    for item in dataset_items(dataset) {
        buffer.push(item);
        if buffer.len() == WRITE_BUFFER_SIZE {
            written += flush(store, &mut buffer).await?;
            tracing::info!("written: {written}");
        }
    }

    if !buffer.is_empty() {
        written += flush(store, &mut buffer).await?;
    }

    tracing::info!(total = written, "Items written");
    Ok(written)
}

async fn flush(store: &dyn KeyValueStore, buffer: &mut Vec<Item>) -> Result<usize> {
    let buffered = std::mem::replace(buffer, Vec::with_capacity(WRITE_BUFFER_SIZE));
    let buffered_count = buffered.len();
    let items = fold_by_key(buffered);
    let count = items.len();
    if count < buffered_count {
        tracing::debug!(folded = buffered_count - count, "Repeated keys folded");
    }

    store
        .batch_put(items)
        .await
        .with_context(|| format!("Failed to write a batch of {count} items"))?;
    Ok(count)
}

/// Reads back the genre partition and the first actor and movie.
///
/// A failing genre query is only logged.
pub async fn verify(store: &dyn KeyValueStore, dataset: &Dataset) -> Result<Verification> {
    let mut verification = Verification::default();

    match store.query_partition(GENRE_PARTITION).await {
        Ok(genres) => {
            tracing::info!(partition = GENRE_PARTITION, count = genres.len(), "Genres");
            for item in genres.iter().take(GENRE_SAMPLE_SIZE) {
                tracing::info!("  {}", render_item(item));
            }
            verification.genres = Some(genres.len());
        }
        Err(err) => {
            tracing::warn!(partition = GENRE_PARTITION, error = %err, "Genre query failed");
        }
    }

    if let Some(nconst) = first_identifier(dataset, Category::Actors, "nconst") {
        let key = actor_key(&nconst);
        let count = echo_partition(store, &key).await?;
        verification.actor = Some((key, count));
    }

    if let Some(id) = first_identifier(dataset, Category::Movies, "id") {
        let key = movie_key(&id);
        let count = echo_partition(store, &key).await?;
        verification.movie = Some((key, count));
    }

    Ok(verification)
}

async fn echo_partition(store: &dyn KeyValueStore, partition_key: &str) -> Result<usize> {
    let items = store
        .query_partition(partition_key)
        .await
        .with_context(|| format!("Failed to query {partition_key}"))?;

    tracing::info!(partition = partition_key, count = items.len(), "Read back");
    if let Some(item) = items.first() {
        tracing::info!("  {}", render_item(item));
    }
    Ok(items.len())
}

fn first_identifier(dataset: &Dataset, category: Category, field: &str) -> Option<String> {
    dataset
        .records(category)
        .first()
        .and_then(|record| identifier(record.get(field)))
}

fn render_item(item: &Item) -> String {
    serde_json::to_string(item).unwrap_or_default()
}
