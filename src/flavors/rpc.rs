//! RPC flavor: the local flavor plus HTTP and health probes.

use crate::config::FlavorConfig;
use crate::di::{ExposesPlugins, FromRef};
use crate::flavors::local::FlavorLocal;
use crate::health::probe::{self, ProbePlugin};
use crate::infra::{PluginConfigs, PluginInfraDeps};
use crate::plugin::Flavor;
use crate::rpc::rest::{self, HttpPlugin};

/// Local plugins followed by `http` and `health_rpc`.
#[derive(ExposesPlugins, Debug)]
pub struct FlavorRpc {
    #[expose(flavor)]
    local: FlavorLocal,
    #[expose]
    http: HttpPlugin,
    #[expose]
    health_rpc: ProbePlugin,
    injected: bool,
}

impl FlavorRpc {
    pub fn new(config: &FlavorConfig) -> Self {
        Self {
            local: FlavorLocal::new(config),
            http: HttpPlugin::new(config.http.clone()),
            health_rpc: ProbePlugin::new(),
            injected: false,
        }
    }

    /// Builds the infrastructure bundle for plugin `name`.
    pub fn infra_deps(&self, name: &str) -> PluginInfraDeps {
        self.local.infra_deps(name)
    }

    pub fn plugin_configs_mut(&mut self) -> &mut PluginConfigs {
        self.local.plugin_configs_mut()
    }

    pub fn local(&self) -> &FlavorLocal {
        &self.local
    }

    pub fn http(&self) -> &HttpPlugin {
        &self.http
    }

    pub fn health_rpc(&self) -> &ProbePlugin {
        &self.health_rpc
    }

    pub fn is_injected(&self) -> bool {
        self.injected
    }
}

impl Default for FlavorRpc {
    fn default() -> Self {
        Self::new(&FlavorConfig::default())
    }
}

impl Flavor for FlavorRpc {
    fn inject(&mut self) -> bool {
        if self.injected {
            return true;
        }
        if !self.local.inject() {
            return false;
        }

        self.http.deps = Some(rest::Deps::from_ref(&self.infra_deps("http")));
        self.health_rpc.deps = Some(probe::Deps::from_ref(&self.infra_deps("health_rpc")));
        self.health_rpc.http = Some(self.http.handlers().clone());

        self.injected = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Agent;
    use crate::health::statuscheck::OperationalState;
    use crate::plugin::plugin_names;

    #[test]
    fn test_local_plugins_come_first() {
        let mut flavor = FlavorRpc::default();
        let names = plugin_names(&flavor.plugins());

        assert_eq!(
            names,
            vec!["logs", "service_label", "status_check", "http", "health_rpc"]
        );
    }

    #[test]
    fn test_local_failure_short_circuits() {
        let config = FlavorConfig {
            microservice_label: String::new(),
            ..Default::default()
        };
        let mut flavor = FlavorRpc::new(&config);

        assert!(!flavor.inject());
        assert!(flavor.http().deps.is_none());
        assert!(flavor.health_rpc().deps.is_none());
    }

    #[test]
    fn test_probes_follow_agent_lifecycle() {
        let mut agent = Agent::new(FlavorRpc::default());
        agent.start().unwrap();

        let flavor = agent.flavor();
        let routes = flavor.http().handlers().routes();
        for path in [probe::LIVENESS_PATH, probe::READINESS_PATH] {
            assert!(routes.iter().any(|r| r.method == "GET" && r.path == path));
        }
        assert_eq!(flavor.http().endpoint(), Some("0.0.0.0:9191"));
        assert!(flavor.health_rpc().readiness());

        let liveness = flavor.health_rpc().liveness().unwrap();
        assert_eq!(liveness["state"], "OK");

        agent.stop().unwrap();
        let flavor = agent.flavor();
        assert!(!flavor.health_rpc().readiness());
        assert!(flavor.http().handlers().routes().is_empty());
        assert_eq!(
            flavor.local().status_check().reporter().agent_status().state,
            OperationalState::Init
        );
    }
}
