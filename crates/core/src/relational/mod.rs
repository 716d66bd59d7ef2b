mod row;
mod traits;

pub use row::{dedupe_last_wins, normalize_movie, normalize_movies, to_year, MovieRow};
pub use traits::{MovieRowStore, Result, RowStoreError};
