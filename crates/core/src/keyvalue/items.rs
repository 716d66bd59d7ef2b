//! Record → item transforms.
//!
//! Each transform takes a source record and returns the item to store, or
//! `None` when the record cannot be keyed. The source record is never
//! modified: items are shallow copies with the key attributes added.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::dataset::{identifier, Category, Dataset};

use super::keys::{
    actor_key, genre_sk, movie_key, title_type_sk, GENRE_PARTITION, PARTITION_KEY, SORT_KEY,
    TITLE_TYPE_PARTITION,
};

/// A key-value item: a JSON object carrying `PK` and `SK`.
pub type Item = Map<String, Value>;

/// Builds the item for a Movie record.
///
/// Skips non-object records and records without an `id`.
pub fn movie_item(record: &Value) -> Option<Item> {
    keyed_copy(record, "id", movie_key)
}

/// Builds the item for an Actor record.
///
/// Skips non-object records and records without an `nconst`.
pub fn actor_item(record: &Value) -> Option<Item> {
    keyed_copy(record, "nconst", actor_key)
}

/// Builds the synthetic item for a genre value. Null and non-string values
/// produce nothing.
pub fn genre_item(value: &Value) -> Option<Item> {
    vocabulary_item(value, GENRE_PARTITION, genre_sk)
}

/// Builds the synthetic item for a title-type value. Null and non-string
/// values produce nothing.
pub fn title_type_item(value: &Value) -> Option<Item> {
    vocabulary_item(value, TITLE_TYPE_PARTITION, title_type_sk)
}

/// All items of a dataset, lazily, in category order.
///
/// Missing or non-array categories contribute nothing. Repeated genre and
/// title-type values each yield an item; they share a key, so the store
/// keeps the last one written.
pub fn dataset_items(dataset: &Dataset) -> impl Iterator<Item = Item> + '_ {
    let movies = dataset.records(Category::Movies).iter().filter_map(movie_item);
    let actors = dataset.records(Category::Actors).iter().filter_map(actor_item);
    let genres = dataset.records(Category::Genres).iter().filter_map(genre_item);
    let title_types = dataset
        .records(Category::TitleTypes)
        .iter()
        .filter_map(title_type_item);

    movies.chain(actors).chain(genres).chain(title_types)
}

/// Folds items sharing a `(PK, SK)` key into the last one, kept at the
/// position of the first. Items without both keys pass through untouched.
///
/// A single batch write rejects repeated keys, so every batch is folded
/// before it is sent.
pub fn fold_by_key(items: Vec<Item>) -> Vec<Item> {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut folded: Vec<Item> = Vec::with_capacity(items.len());

    for item in items {
        let key = match (partition_key(&item), sort_key(&item)) {
            (Some(pk), Some(sk)) => (pk.to_string(), sk.to_string()),
            _ => {
                folded.push(item);
                continue;
            }
        };

        match positions.get(&key) {
            Some(&index) => folded[index] = item,
            None => {
                positions.insert(key, folded.len());
                folded.push(item);
            }
        }
    }

    folded
}

/// Returns the partition key of an item, if it has a string one.
pub fn partition_key(item: &Item) -> Option<&str> {
    item.get(PARTITION_KEY).and_then(Value::as_str)
}

/// Returns the sort key of an item, if it has a string one.
pub fn sort_key(item: &Item) -> Option<&str> {
    item.get(SORT_KEY).and_then(Value::as_str)
}

fn keyed_copy(record: &Value, id_field: &str, key: fn(&str) -> String) -> Option<Item> {
    let map = record.as_object()?;
    let id = identifier(map.get(id_field))?;
    let key = key(&id);

    let mut item = map.clone();
    item.insert(PARTITION_KEY.to_string(), Value::String(key.clone()));
    item.insert(SORT_KEY.to_string(), Value::String(key));
    Some(item)
}

fn vocabulary_item(value: &Value, partition: &str, sort_key: fn(&str) -> String) -> Option<Item> {
    let value = value.as_str()?;

    let mut item = Map::new();
    item.insert(
        PARTITION_KEY.to_string(),
        Value::String(partition.to_string()),
    );
    item.insert(SORT_KEY.to_string(), Value::String(sort_key(value)));
    item.insert("value".to_string(), Value::String(value.to_string()));
    Some(item)
}
