//! RPC plugins: the HTTP endpoint and its route table.

pub mod rest;

pub use rest::{HttpHandlers, HttpPlugin, Route};
