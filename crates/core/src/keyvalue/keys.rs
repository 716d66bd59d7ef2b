//! Key generation for the single-table layout.
//!
//! Pure functions for partition and sort keys. The category prefix of a key
//! tells which kind of record an item holds.

// ============================================================================
// Attribute names
// ============================================================================

pub const PARTITION_KEY: &str = "PK";
pub const SORT_KEY: &str = "SK";

// ============================================================================
// Key prefixes
// ============================================================================

pub const MOVIE_PREFIX: &str = "MOVIE#";
pub const ACTOR_PREFIX: &str = "ACTOR#";
pub const GENRE_PREFIX: &str = "GENRE#";
pub const TITLE_TYPE_PREFIX: &str = "TITLETYPE#";

/// Partition holding every genre value.
pub const GENRE_PARTITION: &str = "META#GENRE";

/// Partition holding every title-type value.
pub const TITLE_TYPE_PARTITION: &str = "META#TITLETYPE";

// ============================================================================
// Record keys
// ============================================================================

/// Generate the key for a Movie.
///
/// Pattern: `MOVIE#<id>` (used for both PK and SK)
pub fn movie_key(id: &str) -> String {
    format!("{MOVIE_PREFIX}{id}")
}

/// Generate the key for an Actor.
///
/// Pattern: `ACTOR#<nconst>` (used for both PK and SK)
pub fn actor_key(nconst: &str) -> String {
    format!("{ACTOR_PREFIX}{nconst}")
}

// ============================================================================
// Vocabulary keys
// ============================================================================

/// Pattern: `GENRE#<value>`
pub fn genre_sk(value: &str) -> String {
    format!("{GENRE_PREFIX}{value}")
}

/// Pattern: `TITLETYPE#<value>`
pub fn title_type_sk(value: &str) -> String {
    format!("{TITLE_TYPE_PREFIX}{value}")
}
