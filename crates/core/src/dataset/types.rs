use std::path::Path;

use serde_json::{Map, Value};

use super::error::{DatasetError, Result};

/// The record categories the toolset knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Movies,
    Actors,
    Genres,
    TitleTypes,
}

impl Category {
    /// All categories, in load order.
    pub const ALL: [Category; 4] = [
        Category::Movies,
        Category::Actors,
        Category::Genres,
        Category::TitleTypes,
    ];

    /// The top-level key of this category in the source document.
    pub fn key(self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::Actors => "actors",
            Category::Genres => "genres",
            Category::TitleTypes => "titleTypes",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A parsed source document.
///
/// The top level is guaranteed to be an object; category values are kept
/// as loosely-typed JSON because the source makes no promises about them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    root: Map<String, Value>,
}

impl Dataset {
    /// Wraps a parsed JSON value, rejecting anything that is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(DatasetError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Parses a dataset from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Reads and parses a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }

    /// Top-level entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.root.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the raw value of a category, if present.
    pub fn get(&self, category: Category) -> Option<&Value> {
        self.root.get(category.key())
    }

    /// Returns the raw value of a category or a `MissingCategory` error.
    pub fn require(&self, category: Category) -> Result<&Value> {
        self.get(category)
            .ok_or_else(|| DatasetError::MissingCategory(category.key().to_string()))
    }

    /// Elements of a category when it is an array; empty otherwise.
    pub fn records(&self, category: Category) -> &[Value] {
        match self.get(category) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }
}

/// Type tag used when reporting non-array values.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extracts a record identifier from a field value.
///
/// Non-empty strings are taken as-is and numbers use their JSON text.
/// Everything else has no identifier.
pub fn identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
