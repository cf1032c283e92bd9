//! Plugins command handler.

use color_eyre::Result;

use crate::agent::Agent;
use crate::flavors::FlavorCassandraRpc;

use super::App;

impl App {
    /// Print the flavor's plugins in lifecycle order, with their log level.
    pub fn run_plugins(&self) -> Result<()> {
        let config = self.load_config()?;
        let mut agent = Agent::new(FlavorCassandraRpc::new(config));
        let names = agent.plugin_names();
        let registry = agent.flavor().rpc().local().log_registry();

        for name in names {
            match registry.level(&name) {
                Some(level) => println!("{:<16} {}", name.to_string(), level),
                None => println!("{}", name),
            }
        }
        Ok(())
    }
}
