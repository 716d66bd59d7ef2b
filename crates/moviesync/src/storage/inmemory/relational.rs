//! In-memory relational store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use moviesync_core::relational::{MovieRow, MovieRowStore, Result, RowStoreError};

/// A row as the `movies` table holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    pub row: MovieRow,
    pub inserted_at: DateTime<Utc>,
}

/// Mimics the `movies` table: the table must exist before writes, one
/// upsert may not touch the same key twice, and `inserted_at` is set on
/// first insert only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMovieRowStore {
    table: Arc<RwLock<Option<HashMap<String, StoredRow>>>>,
}

impl InMemoryMovieRowStore {
    /// Creates a new store without the `movies` table.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn row(&self, movie_id: &str) -> Option<StoredRow> {
        self.table
            .read()
            .await
            .as_ref()
            .and_then(|rows| rows.get(movie_id).cloned())
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.as_ref().map_or(0, HashMap::len)
    }
}

#[async_trait]
impl MovieRowStore for InMemoryMovieRowStore {
    async fn ensure_schema(&self) -> Result<()> {
        let mut table = self.table.write().await;
        if table.is_none() {
            *table = Some(HashMap::new());
        }
        Ok(())
    }

    async fn upsert_movies(&self, rows: &[MovieRow]) -> Result<u64> {
        let mut table = self.table.write().await;
        let existing = table.as_ref().ok_or_else(|| {
            RowStoreError::Statement("relation \"movies\" does not exist".to_string())
        })?;

        let mut seen = HashSet::new();
        if let Some(row) = rows.iter().find(|row| !seen.insert(row.movie_id.as_str())) {
            return Err(RowStoreError::Statement(format!(
                "ON CONFLICT DO UPDATE command cannot affect row a second time ({})",
                row.movie_id
            )));
        }

        let mut updated = existing.clone();
        let now = Utc::now();
        for row in rows {
            let inserted_at = updated
                .get(&row.movie_id)
                .map_or(now, |stored| stored.inserted_at);
            updated.insert(
                row.movie_id.clone(),
                StoredRow {
                    row: row.clone(),
                    inserted_at,
                },
            );
        }

        *table = Some(updated);
        Ok(rows.len() as u64)
    }
}
