//! Error types for plugins and the agent.

use thiserror::Error;

use crate::config::ConfigError;
use crate::plugin::PluginName;
use crate::servicelabel::LabelError;

/// Errors raised by a plugin's lifecycle hooks.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Plugin '{0}' used before its dependencies were injected")]
    MissingDeps(&'static str),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid service label: {0}")]
    InvalidLabel(#[from] LabelError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Route already registered: {method} {path}")]
    RouteConflict { method: String, path: String },
}

/// Errors raised while the agent starts or stops its flavor.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Flavor dependency injection failed")]
    InjectionFailed,

    #[error("Plugin listed more than once: {0}")]
    DuplicatePlugin(PluginName),

    #[error("Plugin '{name}' failed to initialize: {source}")]
    PluginInit {
        name: PluginName,
        #[source]
        source: PluginError,
    },

    #[error("Plugin '{name}' failed after init: {source}")]
    PluginAfterInit {
        name: PluginName,
        #[source]
        source: PluginError,
    },

    #[error("Failed to close plugins: {}", format_failures(.0))]
    PluginClose(Vec<(PluginName, PluginError)>),

    #[error("Agent is already started")]
    AlreadyStarted,
}

fn format_failures(failures: &[(PluginName, PluginError)]) -> String {
    failures
        .iter()
        .map(|(name, err)| format!("{}: {}", name, err))
        .collect::<Vec<_>>()
        .join(", ")
}
