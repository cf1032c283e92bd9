//! Health reporting: per-plugin status tracking and HTTP probes.

pub mod probe;
pub mod statuscheck;

pub use probe::ProbePlugin;
pub use statuscheck::{
    AgentStatus, OperationalState, PluginStatus, StatusCheckPlugin, StatusReporter,
};
