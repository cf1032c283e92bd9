//! Core plugin and flavor contracts.

use std::fmt;

use serde::Serialize;

use crate::error::PluginError;

/// Name under which a plugin is listed in its flavor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PluginName(String);

impl PluginName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PluginName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for PluginName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PluginName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A unit of functionality with its own lifecycle.
///
/// The agent calls `init` on every plugin of a flavor, then `after_init` on
/// every plugin, and `close` in reverse order on shutdown.
pub trait Plugin: Send {
    /// Prepares the plugin. Dependencies are already injected at this point.
    fn init(&mut self) -> Result<(), PluginError>;

    /// Runs once every plugin of the flavor has been initialized.
    fn after_init(&mut self) -> Result<(), PluginError> {
        Ok(())
    }

    /// Releases whatever the plugin acquired.
    fn close(&mut self) -> Result<(), PluginError> {
        Ok(())
    }
}

/// A plugin paired with its name in the flavor.
pub struct NamedPlugin<'a> {
    pub name: PluginName,
    pub plugin: &'a mut dyn Plugin,
}

impl<'a> NamedPlugin<'a> {
    pub fn new(name: impl Into<PluginName>, plugin: &'a mut dyn Plugin) -> Self {
        Self {
            name: name.into(),
            plugin,
        }
    }
}

impl fmt::Debug for NamedPlugin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedPlugin")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Enumerates every plugin reachable from a value, in a stable order.
///
/// Usually derived with `#[derive(ExposesPlugins)]`.
pub trait ExposesPlugins {
    fn exposes_plugins(&mut self) -> Vec<NamedPlugin<'_>>;
}

/// A composable bundle of plugins handed to the agent.
pub trait Flavor: ExposesPlugins {
    /// Wires dependencies between the flavor's plugins.
    ///
    /// Returns false when wiring failed. Safe to call more than once.
    fn inject(&mut self) -> bool;

    /// Lists the flavor's plugins, wiring them first.
    fn plugins(&mut self) -> Vec<NamedPlugin<'_>> {
        self.inject();
        self.exposes_plugins()
    }
}

/// Collects plugin names without keeping the borrows alive.
pub fn plugin_names(plugins: &[NamedPlugin<'_>]) -> Vec<PluginName> {
    plugins.iter().map(|p| p.name.clone()).collect()
}
