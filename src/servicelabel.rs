//! Microservice label: identifies the agent instance among its peers.

use std::fmt;

use thiserror::Error;

use crate::error::PluginError;
use crate::plugin::Plugin;

/// Common prefix of every agent's key space.
pub const AGENT_PREFIX: &str = "/vnf-agent/";

/// Reasons a microservice label cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("microservice label is empty")]
    Empty,

    #[error("microservice label '{0}' must not contain '/' or whitespace")]
    InvalidCharacter(String),
}

/// Label of the running microservice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLabel(String);

impl ServiceLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Key prefix owned by this agent: `/vnf-agent/<label>/`.
    pub fn agent_prefix(&self) -> String {
        format!("{}{}/", AGENT_PREFIX, self.0)
    }

    /// Checks that the label is usable as a key segment.
    pub fn validate(&self) -> Result<(), LabelError> {
        if self.0.is_empty() {
            return Err(LabelError::Empty);
        }
        if self.0.contains('/') || self.0.chars().any(char::is_whitespace) {
            return Err(LabelError::InvalidCharacter(self.0.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for ServiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `service_label` plugin.
#[derive(Debug, Clone)]
pub struct ServiceLabelPlugin {
    label: ServiceLabel,
}

impl ServiceLabelPlugin {
    pub fn new(label: ServiceLabel) -> Self {
        Self { label }
    }

    pub fn label(&self) -> &ServiceLabel {
        &self.label
    }
}

impl Plugin for ServiceLabelPlugin {
    fn init(&mut self) -> Result<(), PluginError> {
        self.label.validate()?;
        tracing::info!(
            label = %self.label,
            prefix = %self.label.agent_prefix(),
            "Microservice label"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_prefix() {
        let label = ServiceLabel::new("vpp1");
        assert_eq!(label.agent_prefix(), "/vnf-agent/vpp1/");
    }

    #[test]
    fn test_validate() {
        assert!(ServiceLabel::new("vpp1").validate().is_ok());
        assert_eq!(ServiceLabel::new("").validate(), Err(LabelError::Empty));
        assert_eq!(
            ServiceLabel::new("a/b").validate(),
            Err(LabelError::InvalidCharacter("a/b".to_string()))
        );
        assert!(matches!(
            ServiceLabel::new("a b").validate(),
            Err(LabelError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_plugin_init_rejects_invalid_label() {
        let mut plugin = ServiceLabelPlugin::new(ServiceLabel::new(""));
        assert!(matches!(
            plugin.init(),
            Err(PluginError::InvalidLabel(LabelError::Empty))
        ));
    }
}
