//! Command flows. Each one reads, transforms and writes once, in order.

pub mod inspect;
pub mod load_dynamodb;
pub mod load_rds;
pub mod schedule;
