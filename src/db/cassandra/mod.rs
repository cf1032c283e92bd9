//! Cassandra client plugin.
//!
//! Reads the client configuration from the file registered for the plugin
//! and turns it into validated [`ClientSettings`]. Without a config file the
//! plugin stays disabled and the rest of the flavor starts normally.

mod config;

pub use config::{ClientConfig, ClientSettings};

use crate::config::ConfigError;
use crate::di::FromContext;
use crate::error::PluginError;
use crate::health::statuscheck::{OperationalState, StatusReporter};
use crate::infra::{PluginConfig, PluginInfraDeps};
use crate::logging::PluginLogger;
use crate::plugin::{Plugin, PluginName};

/// Dependencies of the Cassandra plugin, resolved from its infra bundle.
#[derive(FromContext, Debug, Clone)]
#[from_context(Context = "PluginInfraDeps")]
pub struct Deps {
    pub plugin_name: PluginName,
    pub log: PluginLogger,
    pub plugin_config: PluginConfig,
    pub status_check: StatusReporter,
}

/// The `cassandra` plugin.
#[derive(Debug, Default)]
pub struct CassandraPlugin {
    /// Unset until the owning flavor injects it.
    pub deps: Option<Deps>,
    settings: Option<ClientSettings>,
}

impl CassandraPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a config file was found during init.
    pub fn is_enabled(&self) -> bool {
        self.settings.is_some()
    }

    pub fn settings(&self) -> Option<&ClientSettings> {
        self.settings.as_ref()
    }

    fn read_config(deps: &Deps) -> Result<Option<ClientConfig>, ConfigError> {
        deps.plugin_config.load()
    }
}

impl Plugin for CassandraPlugin {
    fn init(&mut self) -> Result<(), PluginError> {
        let deps = self
            .deps
            .as_ref()
            .ok_or(PluginError::MissingDeps("cassandra"))?;
        let _span = deps.log.span().enter();

        let Some(config) = Self::read_config(deps)? else {
            tracing::info!(
                path = ?deps.plugin_config.path(),
                "Cassandra config not found, skip loading this plugin"
            );
            self.settings = None;
            return Ok(());
        };

        let settings = ClientSettings::try_from(config)?;
        tracing::info!(
            hosts = ?settings.contact_points(),
            protocol_version = settings.protocol_version,
            "Cassandra client configured"
        );

        deps.status_check.register(&deps.plugin_name);
        self.settings = Some(settings);
        Ok(())
    }

    fn after_init(&mut self) -> Result<(), PluginError> {
        if let (Some(deps), true) = (&self.deps, self.is_enabled()) {
            deps.status_check
                .report(&deps.plugin_name, OperationalState::Ok, None);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), PluginError> {
        if self.settings.take().is_some() {
            if let Some(deps) = &self.deps {
                let _span = deps.log.span().enter();
                tracing::debug!("Cassandra client closed");
            }
        }
        Ok(())
    }
}
