//! Local flavor: plugins every agent carries.

use crate::config::FlavorConfig;
use crate::di::{ExposesPlugins, FromRef};
use crate::health::statuscheck::{self, StatusCheckPlugin, StatusReporter};
use crate::infra::{PluginConfigs, PluginInfraDeps};
use crate::logging::{LogRegistry, LogsPlugin};
use crate::plugin::{Flavor, PluginName};
use crate::servicelabel::{ServiceLabel, ServiceLabelPlugin};

/// Logging registry, service label and status check.
#[derive(ExposesPlugins, Debug)]
pub struct FlavorLocal {
    #[expose]
    logs: LogsPlugin,
    #[expose]
    service_label: ServiceLabelPlugin,
    #[expose]
    status_check: StatusCheckPlugin,
    plugin_configs: PluginConfigs,
    injected: bool,
}

impl FlavorLocal {
    pub fn new(config: &FlavorConfig) -> Self {
        Self {
            logs: LogsPlugin::new(LogRegistry::new(), config.log_level.clone()),
            service_label: ServiceLabelPlugin::new(ServiceLabel::new(&config.microservice_label)),
            status_check: StatusCheckPlugin::new(StatusReporter::new()),
            plugin_configs: PluginConfigs::new(),
            injected: false,
        }
    }

    /// Builds the infrastructure bundle for plugin `name`.
    ///
    /// Registers a logger for the plugin as a side effect.
    pub fn infra_deps(&self, name: &str) -> PluginInfraDeps {
        let plugin_name = PluginName::from(name);

        PluginInfraDeps {
            log: self.logs.registry().logger_for(&plugin_name),
            plugin_config: self.plugin_configs.for_plugin(&plugin_name),
            service_label: self.service_label.label().clone(),
            status_check: self.status_check.reporter().clone(),
            plugin_name,
        }
    }

    /// Config file locations, for flavors that add plugins of their own.
    pub fn plugin_configs_mut(&mut self) -> &mut PluginConfigs {
        &mut self.plugin_configs
    }

    pub fn log_registry(&self) -> &LogRegistry {
        self.logs.registry()
    }

    pub fn status_check(&self) -> &StatusCheckPlugin {
        &self.status_check
    }

    pub fn is_injected(&self) -> bool {
        self.injected
    }
}

impl Default for FlavorLocal {
    fn default() -> Self {
        Self::new(&FlavorConfig::default())
    }
}

impl Flavor for FlavorLocal {
    fn inject(&mut self) -> bool {
        if self.injected {
            return true;
        }

        if let Err(reason) = self.service_label.label().validate() {
            tracing::warn!(reason = %reason, "Local flavor injection failed");
            return false;
        }

        self.status_check.deps = Some(statuscheck::Deps::from_ref(
            &self.infra_deps("status_check"),
        ));

        self.injected = true;
        true
    }
}
