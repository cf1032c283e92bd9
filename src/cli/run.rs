//! Run command handler.

use color_eyre::Result;

use crate::agent::Agent;
use crate::flavors::FlavorCassandraRpc;

use super::App;

impl App {
    /// Start the agent, wait for Ctrl-C, then stop it.
    pub async fn run_agent(&self) -> Result<()> {
        let config = self.load_config()?;
        tracing::info!(
            label = %config.microservice_label,
            cassandra_config = %config.cassandra.config_path,
            "Loaded configuration"
        );

        let mut agent = Agent::new(FlavorCassandraRpc::new(config));
        agent.start()?;

        if agent.flavor().cassandra().is_enabled() {
            tracing::info!("Cassandra plugin enabled");
        }

        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown signal received");

        agent.stop()?;
        Ok(())
    }
}
