//! Postgres schema definitions and SQL fragments.
//!
//! Pure data, no I/O.

/// SQL statement creating the `movies` table.
pub const CREATE_MOVIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS movies (
    movie_id TEXT PRIMARY KEY,
    title TEXT,
    original_title TEXT,
    release_year INT,
    title_type_id TEXT,
    title_type_text TEXT,
    genre TEXT,
    primary_image_url TEXT,
    inserted_at TIMESTAMP DEFAULT NOW()
)
"#;

/// Written columns, in bind order. `movie_id` is the conflict target.
pub const MOVIE_COLUMNS: [&str; 8] = [
    "movie_id",
    "title",
    "original_title",
    "release_year",
    "title_type_id",
    "title_type_text",
    "genre",
    "primary_image_url",
];

/// Bind parameters Postgres accepts in one statement.
pub const MAX_BIND_PARAMETERS: usize = u16::MAX as usize;

/// Rows per `INSERT` statement. 1000 rows × 8 binds stays far below
/// `MAX_BIND_PARAMETERS`.
pub const UPSERT_CHUNK_SIZE: usize = 1000;

/// `INSERT INTO movies (...) ` up to the `VALUES` keyword.
pub fn insert_prefix() -> String {
    format!("INSERT INTO movies ({}) ", MOVIE_COLUMNS.join(", "))
}

/// Conflict clause overwriting every non-key column. `inserted_at` is left
/// alone.
pub fn upsert_suffix() -> String {
    let updates: Vec<String> = MOVIE_COLUMNS[1..]
        .iter()
        .map(|column| format!("{column} = EXCLUDED.{column}"))
        .collect();
    format!(" ON CONFLICT (movie_id) DO UPDATE SET {}", updates.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_prefix() {
        assert_eq!(
            insert_prefix(),
            "INSERT INTO movies (movie_id, title, original_title, release_year, \
             title_type_id, title_type_text, genre, primary_image_url) "
        );
    }

    #[test]
    fn test_upsert_suffix_updates_non_key_columns() {
        let suffix = upsert_suffix();

        assert!(suffix.starts_with(" ON CONFLICT (movie_id) DO UPDATE SET title = EXCLUDED.title"));
        assert!(suffix.ends_with("primary_image_url = EXCLUDED.primary_image_url"));
        assert!(!suffix.contains("movie_id = EXCLUDED"));
        assert!(!suffix.contains("inserted_at"));
        assert_eq!(suffix.matches("EXCLUDED.").count(), 7);
    }

    #[test]
    fn test_chunk_fits_bind_limit() {
        assert!(UPSERT_CHUNK_SIZE * MOVIE_COLUMNS.len() <= MAX_BIND_PARAMETERS);
    }

    #[test]
    fn test_create_table_columns() {
        for column in MOVIE_COLUMNS {
            assert!(CREATE_MOVIES_TABLE.contains(column), "missing {column}");
        }
        assert!(CREATE_MOVIES_TABLE.contains("inserted_at TIMESTAMP DEFAULT NOW()"));
    }
}
