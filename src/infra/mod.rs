//! Name-scoped infrastructure dependencies handed to plugins.
//!
//! A flavor builds one [`PluginInfraDeps`] per plugin through its
//! `infra_deps(name)` factory. Each field is extractable on its own through
//! `FromRef<PluginInfraDeps>`, so a plugin's `Deps` struct derives
//! `FromContext` and picks only what it needs.

mod config;

pub use config::{PluginConfig, PluginConfigs};

use crate::di::Context;
use crate::health::statuscheck::StatusReporter;
use crate::logging::PluginLogger;
use crate::plugin::PluginName;
use crate::servicelabel::ServiceLabel;

/// Infrastructure bundle scoped to one plugin.
#[derive(Context, Debug, Clone)]
pub struct PluginInfraDeps {
    /// Name the bundle was scoped to.
    pub plugin_name: PluginName,
    /// Logger registered for the plugin.
    pub log: PluginLogger,
    /// Location of the plugin's own config file.
    pub plugin_config: PluginConfig,
    /// Label of the microservice hosting the plugin.
    pub service_label: ServiceLabel,
    /// Handle for reporting the plugin's operational state.
    pub status_check: StatusReporter,
}
