//! Cassandra client configuration.
//!
//! The config file is TOML:
//!
//! ```toml
//! endpoints = ["10.0.0.1", "10.0.0.2"]
//! port = 9042
//! op_timeout_ms = 600
//! dial_timeout_ms = 600
//! redial_interval_ms = 1000
//! protocol_version = 4
//! ```
//!
//! Only `endpoints` is required.

use std::time::Duration;

use serde::Deserialize;

use crate::error::PluginError;

pub const DEFAULT_PORT: u16 = 9042;
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_millis(600);
pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_millis(600);
pub const DEFAULT_REDIAL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_PROTOCOL_VERSION: u8 = 4;

/// Cassandra client configuration as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Cluster hosts (IP addresses or host names).
    #[serde(default)]
    pub endpoints: Vec<String>,
    pub port: Option<u16>,
    pub op_timeout_ms: Option<u64>,
    pub dial_timeout_ms: Option<u64>,
    pub redial_interval_ms: Option<u64>,
    pub protocol_version: Option<u8>,
}

/// Validated client settings with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub hosts: Vec<String>,
    pub port: u16,
    pub op_timeout: Duration,
    pub dial_timeout: Duration,
    pub redial_interval: Duration,
    pub protocol_version: u8,
}

impl ClientSettings {
    /// `host:port` for every configured host.
    pub fn contact_points(&self) -> Vec<String> {
        self.hosts
            .iter()
            .map(|host| format!("{}:{}", host, self.port))
            .collect()
    }
}

impl TryFrom<ClientConfig> for ClientSettings {
    type Error = PluginError;

    fn try_from(config: ClientConfig) -> Result<Self, Self::Error> {
        let hosts: Vec<String> = config
            .endpoints
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if hosts.is_empty() {
            return Err(PluginError::InvalidConfig(
                "cassandra: at least one endpoint is required".to_string(),
            ));
        }

        let port = config.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(PluginError::InvalidConfig(
                "cassandra: port must be non-zero".to_string(),
            ));
        }

        let protocol_version = config.protocol_version.unwrap_or(DEFAULT_PROTOCOL_VERSION);
        if !(1..=4).contains(&protocol_version) {
            return Err(PluginError::InvalidConfig(format!(
                "cassandra: unsupported protocol version {}",
                protocol_version
            )));
        }

        Ok(Self {
            hosts,
            port,
            op_timeout: config
                .op_timeout_ms
                .map_or(DEFAULT_OP_TIMEOUT, Duration::from_millis),
            dial_timeout: config
                .dial_timeout_ms
                .map_or(DEFAULT_DIAL_TIMEOUT, Duration::from_millis),
            redial_interval: config
                .redial_interval_ms
                .map_or(DEFAULT_REDIAL_INTERVAL, Duration::from_millis),
            protocol_version,
        })
    }
}
