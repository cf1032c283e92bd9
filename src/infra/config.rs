//! Plugin configuration file locations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Format, Toml},
    Figment,
};
use serde::de::DeserializeOwned;

use crate::config::ConfigError;
use crate::plugin::PluginName;

/// Explicit table of plugin config file locations, keyed by plugin name.
#[derive(Debug, Clone, Default)]
pub struct PluginConfigs {
    paths: BTreeMap<PluginName, PathBuf>,
}

impl PluginConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the config file location of a plugin.
    pub fn register(&mut self, name: impl Into<PluginName>, path: impl Into<PathBuf>) {
        self.paths.insert(name.into(), path.into());
    }

    /// Config handle for one plugin. Unregistered plugins get one without a file.
    pub fn for_plugin(&self, name: &PluginName) -> PluginConfig {
        PluginConfig {
            plugin_name: name.clone(),
            path: self.paths.get(name).cloned(),
        }
    }
}

/// Where one plugin's configuration file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    plugin_name: PluginName,
    path: Option<PathBuf>,
}

impl PluginConfig {
    pub fn plugin_name(&self) -> &PluginName {
        &self.plugin_name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Parses the plugin's config file.
    ///
    /// Returns `Ok(None)` if no location is registered or the file is absent.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, ConfigError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(
                plugin = %self.plugin_name,
                path = %path.display(),
                "Plugin config file not found"
            );
            return Ok(None);
        }

        let value = Figment::from(Toml::file(path))
            .extract()
            .map_err(ConfigError::from)?;
        Ok(Some(value))
    }
}
