//! Flavors: plugin bundles ready to hand to the agent.
//!
//! - `FlavorLocal`: logging, service label and status check
//! - `FlavorRpc`: the local flavor plus the HTTP plugin and health probes
//! - `FlavorCassandraRpc`: the RPC flavor plus the Cassandra client plugin

pub mod cassandra_rpc;
pub mod local;
pub mod rpc;

pub use cassandra_rpc::FlavorCassandraRpc;
pub use local::FlavorLocal;
pub use rpc::FlavorRpc;
