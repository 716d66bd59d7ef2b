//! Table configuration types (Functional Core - pure data).

use moviesync_core::keyvalue::keys::{PARTITION_KEY, SORT_KEY};

/// Default table name, shared with the `moviesync` CLI.
pub const DEFAULT_TABLE_NAME: &str = "dynamodb";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Key attribute names, hash key first.
    pub fn key_names(&self) -> Vec<String> {
        std::iter::once(&self.partition_key)
            .chain(self.sort_key.as_ref())
            .map(|key| key.name.clone())
            .collect()
    }
}

/// The single movie table: string `PK` hash key, string `SK` range key.
/// This is a pure function - no I/O.
pub fn movie_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: KeyAttribute {
            name: PARTITION_KEY.to_string(),
            attribute_type: AttributeType::String,
        },
        sort_key: Some(KeyAttribute {
            name: SORT_KEY.to_string(),
            attribute_type: AttributeType::String,
        }),
        billing_mode: BillingMode::PayPerRequest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_table_keys() {
        let config = movie_table_config().with_table_name("movies");
        assert_eq!(config.table_name, "movies");
        assert_eq!(config.key_names(), vec!["PK", "SK"]);
        assert_eq!(config.billing_mode, BillingMode::PayPerRequest);
    }
}
