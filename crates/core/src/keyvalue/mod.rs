mod error;
mod items;
pub mod keys;
mod traits;

pub use error::{Result, StoreError};
pub use items::{
    actor_item, dataset_items, fold_by_key, genre_item, movie_item, partition_key, sort_key,
    title_type_item, Item,
};
pub use traits::KeyValueStore;
