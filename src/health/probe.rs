//! Health probes exposed over the HTTP plugin.

use crate::di::FromContext;
use crate::error::PluginError;
use crate::health::statuscheck::{OperationalState, StatusReporter};
use crate::infra::PluginInfraDeps;
use crate::logging::PluginLogger;
use crate::plugin::{Plugin, PluginName};
use crate::rpc::HttpHandlers;

pub const LIVENESS_PATH: &str = "/liveness";
pub const READINESS_PATH: &str = "/readiness";

#[derive(FromContext, Debug, Clone)]
#[from_context(Context = "PluginInfraDeps")]
pub struct Deps {
    pub plugin_name: PluginName,
    pub log: PluginLogger,
    pub status_check: StatusReporter,
}

/// The `health_rpc` plugin: liveness and readiness probes.
#[derive(Debug, Default)]
pub struct ProbePlugin {
    pub deps: Option<Deps>,
    /// Route table of the HTTP plugin the probes are served on.
    pub http: Option<HttpHandlers>,
}

impl ProbePlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent status as the liveness probe reports it.
    pub fn liveness(&self) -> Result<serde_json::Value, PluginError> {
        let deps = self
            .deps
            .as_ref()
            .ok_or(PluginError::MissingDeps("health_rpc"))?;
        Ok(serde_json::to_value(deps.status_check.agent_status())?)
    }

    /// True once the agent reports `OK`.
    pub fn readiness(&self) -> bool {
        self.deps
            .as_ref()
            .is_some_and(|d| d.status_check.agent_status().state == OperationalState::Ok)
    }
}

impl Plugin for ProbePlugin {
    fn init(&mut self) -> Result<(), PluginError> {
        let deps = self
            .deps
            .as_ref()
            .ok_or(PluginError::MissingDeps("health_rpc"))?;
        let http = self
            .http
            .as_ref()
            .ok_or(PluginError::MissingDeps("health_rpc"))?;
        let _span = deps.log.span().enter();

        http.register("GET", LIVENESS_PATH)?;
        http.register("GET", READINESS_PATH)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), PluginError> {
        if let Some(http) = &self.http {
            http.unregister("GET", LIVENESS_PATH);
            http.unregister("GET", READINESS_PATH);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwired_probe() {
        let mut plugin = ProbePlugin::new();

        assert!(!plugin.readiness());
        assert!(matches!(
            plugin.liveness(),
            Err(PluginError::MissingDeps("health_rpc"))
        ));
        assert!(plugin.init().is_err());
    }
}
