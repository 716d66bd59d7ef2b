use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use crate::dataset::{identifier, json_type_name, Category, Dataset, Result};

/// Structural statistics over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub top_level_keys: Vec<String>,
    pub sizes: Vec<CategorySize>,
    pub samples: Vec<CategorySample>,
    pub field_frequencies: Vec<FieldFrequencies>,
    pub uniqueness: Uniqueness,
    pub known_for: KnownForCoverage,
    pub vocabularies: Vec<Vocabulary>,
}

/// Size of a top-level value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySize {
    pub key: String,
    #[serde(flatten)]
    pub shape: Shape,
}

/// Either a record count or the JSON type of a non-array value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Records(usize),
    Scalar(&'static str),
}

/// One sample value per top-level key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySample {
    pub key: String,
    pub sample: Option<Value>,
}

/// Field-name counts across the object records of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFrequencies {
    pub category: String,
    pub fields: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Uniqueness {
    pub movie_ids_unique: bool,
    pub actor_ids_unique: bool,
}

/// How many actor known-for titles point at a known movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownForCoverage {
    pub matched: usize,
    pub total: usize,
}

/// Summary of a controlled-vocabulary category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    pub category: String,
    pub shape: &'static str,
    pub len: Option<usize>,
    pub first: Option<Value>,
    pub values: Vec<String>,
}

/// Builds the inspection report. Pure: the dataset is only read.
///
/// Fails with `MissingCategory` when any of the four categories is absent.
pub fn inspect(dataset: &Dataset) -> Result<DatasetReport> {
    for category in Category::ALL {
        dataset.require(category)?;
    }

    let top_level_keys = dataset.keys().map(str::to_string).collect();

    let sizes = dataset
        .entries()
        .map(|(key, value)| CategorySize {
            key: key.to_string(),
            shape: match value {
                Value::Array(items) => Shape::Records(items.len()),
                other => Shape::Scalar(json_type_name(other)),
            },
        })
        .collect();

    let samples = dataset
        .entries()
        .map(|(key, value)| CategorySample {
            key: key.to_string(),
            sample: match value {
                Value::Array(items) => items.first().cloned(),
                other => Some(other.clone()),
            },
        })
        .collect();

    let field_frequencies = Category::ALL
        .iter()
        .map(|&category| FieldFrequencies {
            category: category.key().to_string(),
            fields: count_fields(dataset.records(category)),
        })
        .collect();

    let movies = dataset.records(Category::Movies);
    let actors = dataset.records(Category::Actors);

    let uniqueness = Uniqueness {
        movie_ids_unique: all_distinct(movies, "id"),
        actor_ids_unique: all_distinct(actors, "nconst"),
    };

    let known_for = known_for_coverage(movies, actors);

    let vocabularies = [Category::Genres, Category::TitleTypes]
        .iter()
        .map(|&category| vocabulary(category, dataset.get(category)))
        .collect::<Vec<_>>();

    Ok(DatasetReport {
        top_level_keys,
        sizes,
        samples,
        field_frequencies,
        uniqueness,
        known_for,
        vocabularies,
    })
}

/// Counts field names across object records, most common first.
/// Ties keep the order in which the field was first seen.
pub fn count_fields(records: &[Value]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let Value::Object(map) = record else {
            continue;
        };
        for key in map.keys() {
            let count = counts.entry(key.as_str()).or_insert(0);
            if *count == 0 {
                order.push(key.clone());
            }
            *count += 1;
        }
    }

    let mut fields: Vec<(String, usize)> = order
        .into_iter()
        .map(|key| {
            let count = counts[key.as_str()];
            (key, count)
        })
        .collect();
    // stable sort keeps first-seen order among equal counts
    fields.sort_by(|a, b| b.1.cmp(&a.1));
    fields
}

/// True when `field` takes a distinct value in every record.
/// A record without the field contributes `null`.
pub fn all_distinct(records: &[Value], field: &str) -> bool {
    let values: HashSet<String> = records
        .iter()
        .map(|record| {
            record
                .get(field)
                .map(Value::to_string)
                .unwrap_or_else(|| Value::Null.to_string())
        })
        .collect();
    values.len() == records.len()
}

/// Flattens actor `knownForTitles` and counts those naming a known movie id.
/// Ids compare the way items are keyed, so `5` and `"5"` match.
pub fn known_for_coverage(movies: &[Value], actors: &[Value]) -> KnownForCoverage {
    let movie_ids: HashSet<String> = movies
        .iter()
        .filter_map(|m| identifier(m.get("id")))
        .collect();

    let known_for: Vec<&Value> = actors
        .iter()
        .filter_map(|a| a.get("knownForTitles"))
        .flat_map(|titles| match titles {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            Value::String(_) => vec![titles],
            _ => Vec::new(),
        })
        .collect();

    let matched = known_for
        .iter()
        .filter(|title| {
            identifier(Some(**title)).is_some_and(|id| movie_ids.contains(&id))
        })
        .count();

    KnownForCoverage {
        matched,
        total: known_for.len(),
    }
}

fn vocabulary(category: Category, value: Option<&Value>) -> Vocabulary {
    let (len, first, values) = match value {
        Some(Value::Array(items)) => {
            let values: BTreeSet<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            (
                Some(items.len()),
                items.first().cloned(),
                values.into_iter().collect(),
            )
        }
        Some(Value::String(s)) => (Some(s.chars().count()), None, Vec::new()),
        Some(Value::Object(map)) => (Some(map.len()), None, Vec::new()),
        _ => (None, None, Vec::new()),
    };

    Vocabulary {
        category: category.key().to_string(),
        shape: value.map(json_type_name).unwrap_or("null"),
        len,
        first,
        values,
    }
}
