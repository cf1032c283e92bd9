//! Agent: drives the lifecycle of a flavor's plugins.
//!
//! Startup wires the flavor, then calls `init` on every plugin in list
//! order followed by `after_init` on every plugin. Shutdown calls `close`
//! in reverse order. A plugin failing during startup closes the plugins that
//! were already initialized before the error is returned.

use std::collections::BTreeSet;

use crate::error::{AgentError, PluginError};
use crate::plugin::{plugin_names, Flavor, NamedPlugin, PluginName};

/// Host for a single flavor.
#[derive(Debug)]
pub struct Agent<F: Flavor> {
    flavor: F,
    started: bool,
}

impl<F: Flavor> Agent<F> {
    pub fn new(flavor: F) -> Self {
        Self {
            flavor,
            started: false,
        }
    }

    pub fn flavor(&self) -> &F {
        &self.flavor
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Names of the flavor's plugins, in lifecycle order.
    pub fn plugin_names(&mut self) -> Vec<PluginName> {
        plugin_names(&self.flavor.plugins())
    }

    /// Wires and starts every plugin of the flavor.
    pub fn start(&mut self) -> Result<(), AgentError> {
        if self.started {
            return Err(AgentError::AlreadyStarted);
        }
        if !self.flavor.inject() {
            tracing::error!("Flavor dependency injection failed");
            return Err(AgentError::InjectionFailed);
        }

        let mut plugins = self.flavor.plugins();
        check_unique(&plugins)?;
        tracing::info!(plugins = plugins.len(), "Starting agent");

        for i in 0..plugins.len() {
            let named = &mut plugins[i];
            tracing::debug!(plugin = %named.name, "Init");

            if let Err(source) = named.plugin.init() {
                let name = named.name.clone();
                tracing::error!(plugin = %name, error = %source, "Plugin init failed");
                close_reverse(&mut plugins[..i]);
                return Err(AgentError::PluginInit { name, source });
            }
        }

        for i in 0..plugins.len() {
            let named = &mut plugins[i];
            tracing::debug!(plugin = %named.name, "AfterInit");

            if let Err(source) = named.plugin.after_init() {
                let name = named.name.clone();
                tracing::error!(plugin = %name, error = %source, "Plugin after init failed");
                close_reverse(&mut plugins);
                return Err(AgentError::PluginAfterInit { name, source });
            }
        }

        drop(plugins);
        self.started = true;
        tracing::info!("Agent started");
        Ok(())
    }

    /// Closes every plugin in reverse order, even if some fail.
    pub fn stop(&mut self) -> Result<(), AgentError> {
        if !self.started {
            return Ok(());
        }

        tracing::info!("Stopping agent");
        let failures = close_reverse(&mut self.flavor.plugins());
        self.started = false;

        if failures.is_empty() {
            tracing::info!("Agent stopped");
            Ok(())
        } else {
            Err(AgentError::PluginClose(failures))
        }
    }
}

fn check_unique(plugins: &[NamedPlugin<'_>]) -> Result<(), AgentError> {
    let mut seen = BTreeSet::new();
    for named in plugins {
        if !seen.insert(&named.name) {
            return Err(AgentError::DuplicatePlugin(named.name.clone()));
        }
    }
    Ok(())
}

fn close_reverse(plugins: &mut [NamedPlugin<'_>]) -> Vec<(PluginName, PluginError)> {
    let mut failures = Vec::new();

    for named in plugins.iter_mut().rev() {
        tracing::debug!(plugin = %named.name, "Close");
        if let Err(err) = named.plugin.close() {
            tracing::warn!(plugin = %named.name, error = %err, "Plugin close failed");
            failures.push((named.name.clone(), err));
        }
    }

    failures
}
