//! Postgres relational store.
//!
//! Implements `moviesync_core::relational::MovieRowStore` with `sqlx`.

mod schema;
mod store;

pub use store::PostgresMovieStore;
