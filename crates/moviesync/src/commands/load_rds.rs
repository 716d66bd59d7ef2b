//! `moviesync load-rds`

use anyhow::{Context, Result};
use moviesync_core::keyvalue::keys::{MOVIE_PREFIX, PARTITION_KEY};
use moviesync_core::keyvalue::KeyValueStore;
use moviesync_core::relational::{dedupe_last_wins, normalize_movies, MovieRow, MovieRowStore};

use crate::config::{AwsSettings, DatabaseConfig};
use crate::storage::dynamodb::DynamoDbStore;
use crate::storage::postgres::PostgresMovieStore;

/// Copies every movie from the key-value table into Postgres.
///
/// `database` is already validated, so a missing variable never gets as far
/// as a connection attempt.
pub async fn run(aws: &AwsSettings, database: &DatabaseConfig) -> Result<()> {
    let client = moviesync::aws::create_client(aws.client_target()).await;
    let source = DynamoDbStore::new(client, &aws.table_name);
    tracing::info!(table = %aws.target_display(), "Scanning movies");

    let rows = fetch_movie_rows(&source).await?;

    let target = PostgresMovieStore::connect(database)
        .await
        .with_context(|| format!("Failed to connect to {}:{}", database.host, database.port))?;
    let result = write_rows(&target, rows).await;
    target.close().await;

    result.map(|_| ())
}

/// Scans movie items and normalizes them, in scan order.
pub async fn fetch_movie_rows(store: &dyn KeyValueStore) -> Result<Vec<MovieRow>> {
    let items = store
        .scan_prefix(PARTITION_KEY, MOVIE_PREFIX)
        .await
        .context("Failed to scan movies")?;
    tracing::info!("movies fetched: {}", items.len());

    let rows = normalize_movies(&items);
    if let Some(sample) = rows.first() {
        tracing::info!(?sample, "Sample row");
    }
    Ok(rows)
}

/// Creates the table if needed and upserts the rows, last duplicate winning.
/// Returns the number of rows written.
pub async fn write_rows(store: &dyn MovieRowStore, rows: Vec<MovieRow>) -> Result<usize> {
    store
        .ensure_schema()
        .await
        .context("Failed to create the movies table")?;

    let fetched = rows.len();
    let rows = dedupe_last_wins(rows);
    if rows.len() < fetched {
        tracing::warn!(
            duplicates = fetched - rows.len(),
            "Duplicate movie ids folded, last one wins"
        );
    }

    store
        .upsert_movies(&rows)
        .await
        .context("Failed to upsert movies")?;

    tracing::info!("done: inserted/updated {} movies", rows.len());
    Ok(rows.len())
}
