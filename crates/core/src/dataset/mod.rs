mod error;
mod types;

pub use error::{DatasetError, Result};
pub use types::{identifier, json_type_name, Category, Dataset};
