//! Per-plugin loggers and the registry that tracks them.
//!
//! Each plugin gets a [`PluginLogger`]: a tracing span named after the
//! plugin, so every event a plugin emits carries its name. The
//! [`LogRegistry`] remembers every logger handed out together with its
//! level, and the `logs` plugin applies the configured default level.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{Level, Span};

use crate::error::PluginError;
use crate::plugin::{Plugin, PluginName};

/// Logger handed to a single plugin.
#[derive(Debug, Clone)]
pub struct PluginLogger {
    name: PluginName,
    span: Span,
}

impl PluginLogger {
    pub fn name(&self) -> &PluginName {
        &self.name
    }

    /// Span to enter while the plugin logs.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug)]
struct Loggers {
    default_level: Level,
    levels: BTreeMap<PluginName, Level>,
}

/// Shared registry of plugin loggers.
#[derive(Debug, Clone)]
pub struct LogRegistry {
    inner: Arc<RwLock<Loggers>>,
}

impl LogRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Loggers {
                default_level: Level::INFO,
                levels: BTreeMap::new(),
            })),
        }
    }

    /// Returns the logger for `name`, registering it on first use.
    pub fn logger_for(&self, name: &PluginName) -> PluginLogger {
        {
            let mut loggers = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            let level = loggers.default_level;
            loggers.levels.entry(name.clone()).or_insert(level);
        }

        PluginLogger {
            name: name.clone(),
            span: tracing::info_span!("plugin", name = %name),
        }
    }

    pub fn level(&self, name: &PluginName) -> Option<Level> {
        let loggers = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        loggers.levels.get(name).copied()
    }

    pub fn default_level(&self) -> Level {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .default_level
    }

    /// Changes the default level and applies it to every registered logger.
    pub fn set_default_level(&self, level: Level) {
        let mut loggers = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        loggers.default_level = level;
        for current in loggers.levels.values_mut() {
            *current = level;
        }
    }

    /// Registered loggers with their levels, ordered by name.
    pub fn list(&self) -> Vec<(PluginName, Level)> {
        let loggers = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        loggers
            .levels
            .iter()
            .map(|(name, level)| (name.clone(), *level))
            .collect()
    }
}

impl Default for LogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The `logs` plugin: owns the registry and applies the default level.
#[derive(Debug, Clone)]
pub struct LogsPlugin {
    registry: LogRegistry,
    default_level: String,
}

impl LogsPlugin {
    pub fn new(registry: LogRegistry, default_level: impl Into<String>) -> Self {
        Self {
            registry,
            default_level: default_level.into(),
        }
    }

    pub fn registry(&self) -> &LogRegistry {
        &self.registry
    }
}

impl Plugin for LogsPlugin {
    fn init(&mut self) -> Result<(), PluginError> {
        let level = Level::from_str(&self.default_level).map_err(|_| {
            PluginError::InvalidConfig(format!("unknown log level '{}'", self.default_level))
        })?;
        self.registry.set_default_level(level);

        tracing::debug!(
            level = %level,
            loggers = self.registry.list().len(),
            "Log registry initialized"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_for_registers_once() {
        let registry = LogRegistry::new();
        let name = PluginName::from("cassandra");

        let first = registry.logger_for(&name);
        let second = registry.logger_for(&name);

        assert_eq!(first.name(), second.name());
        assert_eq!(registry.list().len(), 1);
        assert_eq!(registry.level(&name), Some(Level::INFO));
    }

    #[test]
    fn test_logs_plugin_applies_default_level() {
        let registry = LogRegistry::new();
        let http = PluginName::from("http");
        registry.logger_for(&http);
        let mut plugin = LogsPlugin::new(registry.clone(), "debug");

        plugin.init().unwrap();

        assert_eq!(registry.default_level(), Level::DEBUG);
        assert_eq!(registry.level(&http), Some(Level::DEBUG));
    }

    #[test]
    fn test_logs_plugin_rejects_unknown_level() {
        let mut plugin = LogsPlugin::new(LogRegistry::new(), "loud");
        let err = plugin.init().unwrap_err();
        assert!(err.to_string().contains("unknown log level 'loud'"));
    }
}
