//! Cassandra RPC flavor: the RPC flavor plus the Cassandra client plugin.

use crate::config::FlavorConfig;
use crate::db::cassandra::{self, CassandraPlugin};
use crate::di::{ExposesPlugins, FromRef};
use crate::flavors::rpc::FlavorRpc;
use crate::plugin::Flavor;

/// Name the Cassandra plugin is listed and scoped under.
pub const CASSANDRA_PLUGIN: &str = "cassandra";

/// Glues the RPC flavor plugins together with the Cassandra client plugin.
///
/// The Cassandra config file location comes from
/// [`CassandraOptions::config_path`](crate::config::CassandraOptions).
#[derive(ExposesPlugins, Debug)]
pub struct FlavorCassandraRpc {
    #[expose(flavor)]
    rpc: FlavorRpc,
    #[expose]
    cassandra: CassandraPlugin,
    injected: bool,
}

impl FlavorCassandraRpc {
    pub fn new(config: FlavorConfig) -> Self {
        let mut rpc = FlavorRpc::new(&config);
        rpc.plugin_configs_mut()
            .register(CASSANDRA_PLUGIN, &config.cassandra.config_path);

        Self {
            rpc,
            cassandra: CassandraPlugin::new(),
            injected: false,
        }
    }

    pub fn rpc(&self) -> &FlavorRpc {
        &self.rpc
    }

    pub fn cassandra(&self) -> &CassandraPlugin {
        &self.cassandra
    }

    pub fn is_injected(&self) -> bool {
        self.injected
    }
}

impl Default for FlavorCassandraRpc {
    fn default() -> Self {
        Self::new(FlavorConfig::default())
    }
}

impl Flavor for FlavorCassandraRpc {
    /// Wires the RPC flavor, then the Cassandra plugin's deps.
    ///
    /// Only a successful run is remembered; after a failure the next call
    /// asks the RPC flavor again.
    fn inject(&mut self) -> bool {
        if self.injected {
            return true;
        }
        if !self.rpc.inject() {
            return false;
        }

        self.cassandra.deps = Some(cassandra::Deps::from_ref(
            &self.rpc.infra_deps(CASSANDRA_PLUGIN),
        ));

        self.injected = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{plugin_names, PluginName};
    use std::collections::BTreeSet;
    use std::path::Path;

    fn failing_config() -> FlavorConfig {
        FlavorConfig {
            microservice_label: String::new(),
            ..Default::default()
        }
    }

    #[test]
    fn test_failed_base_leaves_cassandra_unwired() {
        let mut flavor = FlavorCassandraRpc::new(failing_config());

        assert!(!flavor.inject());
        assert!(flavor.cassandra().deps.is_none());
        assert!(!flavor.is_injected());

        // Not latched: a retry consults the base flavor again
        assert!(!flavor.inject());
        assert!(flavor.cassandra().deps.is_none());
    }

    #[test]
    fn test_inject_scopes_deps_to_cassandra() {
        let mut flavor = FlavorCassandraRpc::default();

        assert!(flavor.inject());

        let deps = flavor.cassandra().deps.as_ref().unwrap();
        assert_eq!(deps.plugin_name, "cassandra");
        assert_eq!(deps.log.name(), &PluginName::from("cassandra"));
        assert_eq!(
            deps.plugin_config.path(),
            Some(Path::new("cassandra.conf"))
        );
    }

    #[test]
    fn test_configured_path_reaches_plugin() {
        let mut config = FlavorConfig::default();
        config.cassandra.config_path = "/etc/agent/cassandra.conf".to_string();
        let mut flavor = FlavorCassandraRpc::new(config);

        assert!(flavor.inject());
        assert_eq!(
            flavor.cassandra().deps.as_ref().unwrap().plugin_config.path(),
            Some(Path::new("/etc/agent/cassandra.conf"))
        );
    }

    #[test]
    fn test_plugins_wires_zero_value_flavor() {
        let mut flavor = FlavorCassandraRpc::default();
        assert!(!flavor.is_injected());

        let count = flavor.plugins().len();

        assert!(flavor.is_injected());
        assert!(flavor.cassandra().deps.is_some());

        let mut rpc = FlavorRpc::default();
        assert_eq!(count, rpc.plugins().len() + 1);
    }

    #[test]
    fn test_plugins_listed_once_in_order() {
        let mut flavor = FlavorCassandraRpc::default();
        let names = plugin_names(&flavor.plugins());

        assert_eq!(
            names,
            vec![
                "logs",
                "service_label",
                "status_check",
                "http",
                "health_rpc",
                "cassandra"
            ]
        );
        let unique: BTreeSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_plugins_listed_even_when_wiring_fails() {
        let mut flavor = FlavorCassandraRpc::new(failing_config());
        let names = plugin_names(&flavor.plugins());

        assert_eq!(names.len(), 6);
        assert!(flavor.cassandra().deps.is_none());
    }

    #[test]
    fn test_second_inject_keeps_same_bundle() {
        let mut flavor = FlavorCassandraRpc::default();

        assert!(flavor.inject());
        let first = flavor.cassandra().deps.clone().unwrap();
        assert!(flavor.inject());
        let second = flavor.cassandra().deps.clone().unwrap();

        assert_eq!(first.plugin_name, second.plugin_name);
        assert_eq!(first.plugin_config, second.plugin_config);
        assert_eq!(flavor.rpc().local().log_registry().list().len(), 4);
    }
}
