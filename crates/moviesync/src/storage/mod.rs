//! Store adapters.
//!
//! Concrete implementations of the store traits defined in
//! `moviesync_core`: DynamoDB for the key-value side, Postgres for the
//! relational side, and in-memory fakes for tests.

pub mod dynamodb;
pub mod postgres;

#[cfg(test)]
pub mod inmemory;
