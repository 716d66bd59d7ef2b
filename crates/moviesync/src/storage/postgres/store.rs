//! Postgres store implementation.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, QueryBuilder};

use moviesync_core::relational::{MovieRow, MovieRowStore, Result, RowStoreError};

use super::schema::{
    insert_prefix, upsert_suffix, CREATE_MOVIES_TABLE, MAX_BIND_PARAMETERS, MOVIE_COLUMNS,
    UPSERT_CHUNK_SIZE,
};
use crate::config::DatabaseConfig;

/// `movies` table in Postgres.
pub struct PostgresMovieStore {
    pool: PgPool,
}

impl PostgresMovieStore {
    /// Creates a new store from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a single-connection pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| RowStoreError::Connection(e.to_string()))?;

        Ok(Self::new(pool))
    }

    /// Closes the pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// One multi-row `INSERT ... ON CONFLICT` for `chunk`, binding the columns
/// in `MOVIE_COLUMNS` order.
fn upsert_statement(chunk: &[MovieRow]) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(insert_prefix());
    builder.push_values(chunk, |mut values, row| {
        values
            .push_bind(row.movie_id.clone())
            .push_bind(row.title.clone())
            .push_bind(row.original_title.clone())
            .push_bind(row.release_year)
            .push_bind(row.title_type_id.clone())
            .push_bind(row.title_type_text.clone())
            .push_bind(row.genre.clone())
            .push_bind(row.primary_image_url.clone());
    });
    builder.push(upsert_suffix());
    builder
}

/// Binds one statement carries for `rows` rows.
fn bind_count(rows: usize) -> usize {
    rows * MOVIE_COLUMNS.len()
}

#[async_trait]
impl MovieRowStore for PostgresMovieStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_MOVIES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| RowStoreError::Statement(e.to_string()))?;

        Ok(())
    }

    async fn upsert_movies(&self, rows: &[MovieRow]) -> Result<u64> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RowStoreError::Connection(e.to_string()))?;

        let mut affected = 0;
        for chunk in rows.chunks(UPSERT_CHUNK_SIZE) {
            debug_assert!(bind_count(chunk.len()) <= MAX_BIND_PARAMETERS);
            let mut builder = upsert_statement(chunk);
            let result = builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(|e| RowStoreError::Statement(e.to_string()))?;
            affected += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| RowStoreError::Statement(e.to_string()))?;

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(count: usize) -> Vec<MovieRow> {
        (0..count)
            .map(|i| MovieRow {
                movie_id: format!("tt{i}"),
                title: Some(format!("Title {i}")),
                original_title: None,
                release_year: Some(2000),
                title_type_id: None,
                title_type_text: None,
                genre: None,
                primary_image_url: None,
            })
            .collect()
    }

    #[test]
    fn test_full_chunk_stays_under_bind_limit() {
        let rows = rows(UPSERT_CHUNK_SIZE);
        let builder = upsert_statement(&rows);
        let sql = builder.sql();

        let last = bind_count(UPSERT_CHUNK_SIZE);
        assert!(last <= MAX_BIND_PARAMETERS);
        assert!(sql.contains(&format!("${last})")));
        assert!(!sql.contains(&format!("${}", last + 1)));
    }

    #[test]
    fn test_upsert_statement_shape() {
        let rows = rows(2);
        let builder = upsert_statement(&rows);
        let sql = builder.sql();

        assert!(sql.starts_with(&insert_prefix()));
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8), ($9, "));
        assert!(sql.ends_with(&upsert_suffix()));
    }

    #[test]
    fn test_rows_split_into_chunks() {
        let rows = rows(2 * UPSERT_CHUNK_SIZE + 1);
        let sizes: Vec<usize> = rows.chunks(UPSERT_CHUNK_SIZE).map(<[_]>::len).collect();
        assert_eq!(sizes, vec![UPSERT_CHUNK_SIZE, UPSERT_CHUNK_SIZE, 1]);
        assert!(sizes.iter().all(|&n| bind_count(n) <= MAX_BIND_PARAMETERS));
    }
}
