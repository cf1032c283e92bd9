//! CLI module for the Cassandra RPC agent.
//!
//! Subcommands:
//! - `run`: Start the agent and block until Ctrl-C
//! - `plugins`: Print the flavor's plugin list

mod plugins;
mod run;

use clap::{Parser, Subcommand};

use crate::config::{ConfigOverrides, ConfigError, FlavorConfig};

/// Cassandra RPC agent
#[derive(Parser)]
#[command(name = "cassandra-rpc-agent")]
#[command(about = "Agent running the RPC flavor with a Cassandra client plugin")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Location of the Cassandra client configuration file
    #[arg(long, global = true)]
    pub cassandra_config: Option<String>,

    /// Label identifying this microservice instance
    #[arg(long, global = true)]
    pub microservice_label: Option<String>,

    /// Port of the HTTP endpoint
    #[arg(long, global = true)]
    pub http_port: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the agent and run until interrupted
    Run,

    /// List the plugins of the flavor
    Plugins,
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Run => self.run_agent().await,
            Command::Plugins => self.run_plugins(),
        }
    }

    /// Loads the layered config with this invocation's overrides on top.
    fn load_config(&self) -> Result<FlavorConfig, ConfigError> {
        FlavorConfig::load_with(&ConfigOverrides {
            microservice_label: self.microservice_label.clone(),
            http_port: self.http_port,
            cassandra_config: self.cassandra_config.clone(),
        })
    }
}
