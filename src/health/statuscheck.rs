//! Operational state of the agent and of each plugin.
//!
//! Plugins register with the [`StatusReporter`] they receive in their infra
//! deps and report state changes through it. The agent state is derived:
//! any plugin in `Error` makes the agent `Error`; otherwise the agent is `Ok`
//! once startup finished and every registered plugin reports `Ok`.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::di::FromContext;
use crate::error::PluginError;
use crate::infra::PluginInfraDeps;
use crate::logging::PluginLogger;
use crate::plugin::{Plugin, PluginName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationalState {
    Init,
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginStatus {
    pub state: OperationalState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Snapshot of the agent's health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentStatus {
    pub state: OperationalState,
    pub plugins: BTreeMap<PluginName, PluginStatus>,
}

#[derive(Debug, Default)]
struct Statuses {
    started: bool,
    plugins: BTreeMap<PluginName, PluginStatus>,
}

/// Shared handle for registering plugins and reporting their state.
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    inner: Arc<RwLock<Statuses>>,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a plugin in the `Init` state.
    pub fn register(&self, name: &PluginName) {
        let mut statuses = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        statuses.plugins.entry(name.clone()).or_insert(PluginStatus {
            state: OperationalState::Init,
            last_error: None,
        });
    }

    /// Records a plugin's state, registering it if needed.
    pub fn report(&self, name: &PluginName, state: OperationalState, error: Option<String>) {
        let mut statuses = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if state == OperationalState::Error {
            tracing::warn!(plugin = %name, error = ?error, "Plugin reported error state");
        }
        statuses.plugins.insert(
            name.clone(),
            PluginStatus {
                state,
                last_error: error,
            },
        );
    }

    pub fn agent_status(&self) -> AgentStatus {
        let statuses = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let states = || statuses.plugins.values().map(|s| s.state);

        let state = if states().any(|s| s == OperationalState::Error) {
            OperationalState::Error
        } else if statuses.started && states().all(|s| s == OperationalState::Ok) {
            OperationalState::Ok
        } else {
            OperationalState::Init
        };

        AgentStatus {
            state,
            plugins: statuses.plugins.clone(),
        }
    }

    fn set_started(&self, started: bool) {
        let mut statuses = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        statuses.started = started;
    }
}

#[derive(FromContext, Debug, Clone)]
#[from_context(Context = "PluginInfraDeps")]
pub struct Deps {
    pub plugin_name: PluginName,
    pub log: PluginLogger,
}

/// The `status_check` plugin: owns the status registry.
#[derive(Debug)]
pub struct StatusCheckPlugin {
    pub deps: Option<Deps>,
    reporter: StatusReporter,
}

impl StatusCheckPlugin {
    pub fn new(reporter: StatusReporter) -> Self {
        Self {
            deps: None,
            reporter,
        }
    }

    pub fn reporter(&self) -> &StatusReporter {
        &self.reporter
    }
}

impl Plugin for StatusCheckPlugin {
    fn init(&mut self) -> Result<(), PluginError> {
        let deps = self
            .deps
            .as_ref()
            .ok_or(PluginError::MissingDeps("status_check"))?;
        let _span = deps.log.span().enter();

        self.reporter.set_started(false);
        tracing::debug!("Agent status: INIT");
        Ok(())
    }

    fn after_init(&mut self) -> Result<(), PluginError> {
        self.reporter.set_started(true);
        tracing::info!(state = ?self.reporter.agent_status().state, "Agent started");
        Ok(())
    }

    fn close(&mut self) -> Result<(), PluginError> {
        self.reporter.set_started(false);
        Ok(())
    }
}
