use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::dataset::identifier;
use crate::keyvalue::Item;

/// Flat relational projection of a Movie item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRow {
    pub movie_id: String,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_year: Option<i32>,
    pub title_type_id: Option<String>,
    pub title_type_text: Option<String>,
    pub genre: Option<String>,
    pub primary_image_url: Option<String>,
}

/// Flattens a Movie item into a `MovieRow`.
///
/// Returns `None` when the item has no identifier. Fields without a rule
/// here are dropped.
pub fn normalize_movie(item: &Item) -> Option<MovieRow> {
    let movie_id = identifier(item.get("id"))?;

    let release_year = match item.get("releaseYear") {
        Some(Value::Object(year)) => to_year(year.get("year")),
        other => to_year(other),
    };

    let (title_type_id, title_type_text) = match item.get("titleType") {
        Some(Value::Object(tt)) => (string_field(tt.get("id")), string_field(tt.get("text"))),
        other => (None, string_field(other)),
    };

    let primary_image_url = match item.get("primaryImage") {
        Some(Value::Object(image)) => string_field(image.get("url")),
        _ => None,
    };

    Some(MovieRow {
        movie_id,
        title: nested_text(item.get("titleText")),
        original_title: nested_text(item.get("originalTitleText")),
        release_year,
        title_type_id,
        title_type_text,
        genre: string_field(item.get("genre")),
        primary_image_url,
    })
}

/// Normalizes every item that has an identifier, in scan order.
pub fn normalize_movies(items: &[Item]) -> Vec<MovieRow> {
    items.iter().filter_map(normalize_movie).collect()
}

/// Keeps the last row for each `movie_id`, preserving first-seen order.
///
/// One `INSERT ... ON CONFLICT DO UPDATE` statement may not touch the same key
/// twice, so duplicates are folded before writing with last-write-wins.
pub fn dedupe_last_wins(rows: Vec<MovieRow>) -> Vec<MovieRow> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<MovieRow> = Vec::with_capacity(rows.len());

    for row in rows {
        match position.get(&row.movie_id) {
            Some(&index) => unique[index] = row,
            None => {
                position.insert(row.movie_id.clone(), unique.len());
                unique.push(row);
            }
        }
    }

    unique
}

/// Coerces a year value to an integer.
///
/// Accepts integers, numbers with a fractional part (truncated toward zero),
/// and strings made only of ASCII digits. Anything else is `None`.
pub fn to_year(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok()
            } else if let Some(u) = n.as_u64() {
                i32::try_from(u).ok()
            } else {
                n.as_f64()
                    .map(f64::trunc)
                    .filter(|f| *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX))
                    .map(|f| f as i32)
            }
        }
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse().ok()
        }
        _ => None,
    }
}

/// `{"text": "..."}` → the text.
fn nested_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Object(map)) => string_field(map.get("text")),
        _ => None,
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_normalize_full_movie() {
        let movie = item(json!({
            "PK": "MOVIE#tt1",
            "SK": "MOVIE#tt1",
            "id": "tt1",
            "titleText": {"text": "Foo"},
            "releaseYear": {"year": 2020},
            "titleType": {"id": "movie", "text": "Movie"},
            "genre": "Drama",
        }));

        assert_eq!(
            normalize_movie(&movie),
            Some(MovieRow {
                movie_id: "tt1".to_string(),
                title: Some("Foo".to_string()),
                original_title: None,
                release_year: Some(2020),
                title_type_id: Some("movie".to_string()),
                title_type_text: Some("Movie".to_string()),
                genre: Some("Drama".to_string()),
                primary_image_url: None,
            })
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let movie = item(json!({
            "id": "tt2",
            "originalTitleText": {"text": "Bar"},
            "primaryImage": {"url": "https://img/bar.jpg", "width": 100},
            "releaseYear": "1999",
        }));

        let first = normalize_movie(&movie).unwrap();
        let second = normalize_movie(&movie).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.movie_id, "tt2");
        assert_eq!(first.original_title.as_deref(), Some("Bar"));
        assert_eq!(first.primary_image_url.as_deref(), Some("https://img/bar.jpg"));
        assert_eq!(first.release_year, Some(1999));
    }

    #[test]
    fn test_normalize_without_identifier() {
        assert!(normalize_movie(&item(json!({"titleText": {"text": "Foo"}}))).is_none());
        assert!(normalize_movie(&item(json!({"id": ""}))).is_none());
    }

    #[test]
    fn test_title_type_as_bare_string() {
        let row = normalize_movie(&item(json!({"id": "tt3", "titleType": "tvSeries"}))).unwrap();
        assert_eq!(row.title_type_id, None);
        assert_eq!(row.title_type_text.as_deref(), Some("tvSeries"));
    }

    #[test]
    fn test_primary_image_requires_object() {
        let row =
            normalize_movie(&item(json!({"id": "tt4", "primaryImage": "https://img"}))).unwrap();
        assert_eq!(row.primary_image_url, None);
    }

    #[test]
    fn test_title_text_requires_object() {
        let row = normalize_movie(&item(json!({"id": "tt5", "titleText": "Plain"}))).unwrap();
        assert_eq!(row.title, None);
    }

    #[test]
    fn test_to_year_variants() {
        assert_eq!(to_year(Some(&json!(2023))), Some(2023));
        assert_eq!(to_year(Some(&json!(2023.0))), Some(2023));
        assert_eq!(to_year(Some(&json!(2023.9))), Some(2023));
        assert_eq!(to_year(Some(&json!("2023"))), Some(2023));
        assert_eq!(to_year(Some(&json!("20x3"))), None);
        assert_eq!(to_year(Some(&json!("-5"))), None);
        assert_eq!(to_year(Some(&json!(""))), None);
        assert_eq!(to_year(Some(&json!(true))), None);
        assert_eq!(to_year(Some(&json!(null))), None);
        assert_eq!(to_year(Some(&json!(1e12))), None);
        assert_eq!(to_year(None), None);
    }

    #[test]
    fn test_release_year_nested_null() {
        let row = normalize_movie(&item(json!({
            "id": "tt6",
            "releaseYear": {"year": null, "endYear": null},
        })))
        .unwrap();
        assert_eq!(row.release_year, None);
    }

    #[test]
    fn test_dedupe_last_wins() {
        let row = |id: &str, genre: &str| MovieRow {
            movie_id: id.to_string(),
            title: None,
            original_title: None,
            release_year: None,
            title_type_id: None,
            title_type_text: None,
            genre: Some(genre.to_string()),
            primary_image_url: None,
        };

        let rows = dedupe_last_wins(vec![
            row("tt1", "Drama"),
            row("tt2", "Action"),
            row("tt1", "Comedy"),
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].movie_id, "tt1");
        assert_eq!(rows[0].genre.as_deref(), Some("Comedy"));
        assert_eq!(rows[1].movie_id, "tt2");
    }

    #[test]
    fn test_normalize_movies_skips_unidentified() {
        let items = vec![
            item(json!({"id": "tt1"})),
            item(json!({"PK": "MOVIE#"})),
            item(json!({"id": "tt2"})),
        ];
        let ids: Vec<String> = normalize_movies(&items)
            .into_iter()
            .map(|r| r.movie_id)
            .collect();
        assert_eq!(ids, vec!["tt1", "tt2"]);
    }
}
