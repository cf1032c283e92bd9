//! Agent configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Compiled-in defaults
//! 2. User config: `~/.config/cassandra-rpc-agent/config.toml` (XDG) or platform config dir
//! 3. Project config: `agent.toml`
//! 4. Environment variables: `AGENT_*` (nested keys separated by `__`)
//! 5. Well-known variables: `MICROSERVICE_LABEL`, `HTTP_PORT`, `CASSANDRA_CONFIG`
//! 6. Command line overrides
//!
//! # Example
//!
//! ```toml
//! microservice_label = "vpp1"
//! log_level = "info"
//!
//! [http]
//! host = "0.0.0.0"
//! port = 9191
//!
//! [cassandra]
//! config_path = "/etc/agent/cassandra.conf"
//! ```

use std::ops::Deref;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Project-level config file, relative to the working directory.
pub const PROJECT_CONFIG_FILE: &str = "agent.toml";

/// Default location of the Cassandra client configuration file.
pub const DEFAULT_CASSANDRA_CONFIG: &str = "cassandra.conf";

/// Environment variable overriding the Cassandra configuration location.
pub const CASSANDRA_CONFIG_ENV: &str = "CASSANDRA_CONFIG";

/// Well-known variables holding string values, with the key they set.
const STRING_ENV_VARS: [(&str, &str); 2] = [
    ("MICROSERVICE_LABEL", "microservice_label"),
    (CASSANDRA_CONFIG_ENV, "cassandra.config_path"),
];

pub const DEFAULT_MICROSERVICE_LABEL: &str = "vpp1";

pub const DEFAULT_HTTP_PORT: u16 = 9191;

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration of a flavor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlavorConfig {
    /// Label identifying this microservice instance (e.g., "vpp1").
    pub microservice_label: String,
    /// Default level for plugin loggers.
    pub log_level: String,
    pub http: HttpConfig,
    pub cassandra: CassandraOptions,
}

impl Default for FlavorConfig {
    fn default() -> Self {
        Self {
            microservice_label: DEFAULT_MICROSERVICE_LABEL.to_string(),
            log_level: "info".to_string(),
            http: HttpConfig::default(),
            cassandra: CassandraOptions::default(),
        }
    }
}

/// HTTP endpoint of the RPC flavor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Where the Cassandra plugin finds its client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CassandraOptions {
    /// Location of the Cassandra client configuration file.
    /// Also set via the `CASSANDRA_CONFIG` environment variable.
    pub config_path: String,
}

impl Default for CassandraOptions {
    fn default() -> Self {
        Self {
            config_path: DEFAULT_CASSANDRA_CONFIG.to_string(),
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub microservice_label: Option<String>,
    pub http_port: Option<u16>,
    pub cassandra_config: Option<String>,
}

impl FlavorConfig {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&ConfigOverrides::default())
    }

    /// Load config, then apply command line overrides on top.
    pub fn load_with(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut figment = Self::figment();

        if let Some(label) = &overrides.microservice_label {
            figment = figment.merge(Serialized::default("microservice_label", label));
        }
        if let Some(port) = overrides.http_port {
            figment = figment.merge(Serialized::default("http.port", port));
        }
        if let Some(path) = &overrides.cassandra_config {
            figment = figment.merge(Serialized::default("cassandra.config_path", path));
        }

        figment.extract().map_err(ConfigError::from)
    }

    /// The layered figment without command line overrides.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(FlavorConfig::default()))
            // Layer 2: User config
            .merge(Toml::file(Self::user_config_path()))
            // Layer 3: Project config
            .merge(Toml::file(PROJECT_CONFIG_FILE))
            // Layer 4: Prefixed environment variables
            .merge(Env::prefixed("AGENT_").split("__"))
            // Layer 5: Well-known environment variables
            .merge(Env::raw().only(&["HTTP_PORT"]).map(|_| "http.port".into()));

        // Env would parse values like "2024" as integers; these keys are strings
        for (var, key) in STRING_ENV_VARS {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }

        figment
    }

    /// User config path: ~/.config/cassandra-rpc-agent/config.toml (XDG) or platform config dir.
    fn user_config_path() -> std::path::PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home
                .join(".config")
                .join("cassandra-rpc-agent")
                .join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("cassandra-rpc-agent").join("config.toml"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = FlavorConfig::default();
        assert_eq!(config.microservice_label, "vpp1");
        assert_eq!(config.http.port, 9191);
        assert_eq!(config.cassandra.config_path, "cassandra.conf");
    }

    #[test]
    fn test_cassandra_config_env_override() {
        Jail::expect_with(|jail| {
            jail.set_env("CASSANDRA_CONFIG", "/etc/agent/cassandra.conf");

            let config: FlavorConfig = FlavorConfig::figment().extract()?;
            assert_eq!(config.cassandra.config_path, "/etc/agent/cassandra.conf");
            assert_eq!(config.microservice_label, "vpp1");
            Ok(())
        });
    }

    #[test]
    fn test_numeric_looking_env_values_stay_strings() {
        Jail::expect_with(|jail| {
            jail.set_env("CASSANDRA_CONFIG", "2024");
            jail.set_env("MICROSERVICE_LABEL", "42");

            let config = FlavorConfig::load().map_err(|e| *e.0)?;
            assert_eq!(config.cassandra.config_path, "2024");
            assert_eq!(config.microservice_label, "42");
            Ok(())
        });
    }

    #[test]
    fn test_project_file_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
                    microservice_label = "from-file"

                    [http]
                    port = 8080

                    [cassandra]
                    config_path = "file.conf"
                "#,
            )?;
            jail.set_env("MICROSERVICE_LABEL", "from-env");
            jail.set_env("AGENT_HTTP__HOST", "127.0.0.1");

            let config: FlavorConfig = FlavorConfig::figment().extract()?;
            assert_eq!(config.microservice_label, "from-env");
            assert_eq!(config.http.host, "127.0.0.1");
            assert_eq!(config.http.port, 8080);
            assert_eq!(config.cassandra.config_path, "file.conf");
            Ok(())
        });
    }

    #[test]
    fn test_command_line_overrides_win() {
        Jail::expect_with(|jail| {
            jail.set_env("CASSANDRA_CONFIG", "env.conf");

            let overrides = ConfigOverrides {
                cassandra_config: Some("cli.conf".to_string()),
                http_port: Some(7000),
                ..Default::default()
            };
            let config = FlavorConfig::load_with(&overrides).map_err(|e| *e.0)?;
            assert_eq!(config.cassandra.config_path, "cli.conf");
            assert_eq!(config.http.port, 7000);
            Ok(())
        });
    }
}
