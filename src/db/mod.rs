//! Database client plugins.

pub mod cassandra;
