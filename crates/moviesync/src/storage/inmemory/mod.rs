//! In-memory fakes for the store traits.
//!
//! Used by the command tests; nothing is persisted.

mod crontab;
mod keyvalue;
mod relational;

pub use crontab::RecordingCrontab;
pub use keyvalue::InMemoryKeyValueStore;
pub use relational::InMemoryMovieRowStore;
