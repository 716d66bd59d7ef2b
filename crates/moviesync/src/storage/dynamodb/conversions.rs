//! DynamoDB attribute conversion functions.
//!
//! Pure functions between JSON items and DynamoDB attribute maps, testable
//! without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use moviesync_core::keyvalue::{Item, StoreError};

pub type AttributeMap = HashMap<String, AttributeValue>;

/// Convert a JSON item to a DynamoDB item.
pub fn item_to_attributes(item: &Item) -> Result<AttributeMap, StoreError> {
    serde_dynamo::to_item(item).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Convert a DynamoDB item back to JSON.
pub fn attributes_to_item(attributes: AttributeMap) -> Result<Item, StoreError> {
    serde_dynamo::from_item(attributes).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Shorthand for a string attribute.
pub fn string_attribute(value: &str) -> AttributeValue {
    AttributeValue::S(value.to_string())
}
