//! Functional core for moviesync.
//!
//! Everything in this crate is pure data and pure functions, plus the store
//! traits the imperative shell implements. The only I/O is reading the
//! dataset file.

pub mod dataset;
pub mod inspect;
pub mod keyvalue;
pub mod relational;
pub mod schedule;
