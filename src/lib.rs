//! Cassandra RPC flavor - plugin bundle for a Cassandra-backed RPC agent
//!
//! Plugins are grouped into flavors; the agent drives their lifecycle.

pub mod agent;
pub mod cli;
pub mod config;
pub mod db;
pub mod di;
pub mod error;
pub mod flavors;
pub mod health;
pub mod infra;
pub mod logging;
pub mod plugin;
pub mod rpc;
pub mod servicelabel;

// Re-exported at crate root for di-macros generated code
pub use plugin::{ExposesPlugins, NamedPlugin};
pub use di::FromRef;
