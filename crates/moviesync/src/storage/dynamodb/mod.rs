//! DynamoDB key-value store.
//!
//! Implements `moviesync_core::keyvalue::KeyValueStore` with
//! `aws-sdk-dynamodb`. Items cross the boundary as JSON objects and are
//! converted with `serde_dynamo`.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbStore;
