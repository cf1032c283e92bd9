//! End-to-end tests of the Cassandra RPC flavor under the agent.

use std::io::Write;

use cassandra_rpc_flavor::agent::Agent;
use cassandra_rpc_flavor::config::FlavorConfig;
use cassandra_rpc_flavor::error::{AgentError, PluginError};
use cassandra_rpc_flavor::flavors::FlavorCassandraRpc;
use cassandra_rpc_flavor::health::OperationalState;
use cassandra_rpc_flavor::plugin::{Flavor, PluginName};
use figment::Jail;

fn config_with_cassandra_file(path: &std::path::Path) -> FlavorConfig {
    let mut config = FlavorConfig::default();
    config.cassandra.config_path = path.to_string_lossy().to_string();
    config
}

#[test]
fn test_agent_runs_without_cassandra_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_cassandra_file(&dir.path().join("cassandra.conf"));
    let mut agent = Agent::new(FlavorCassandraRpc::new(config));

    agent.start().unwrap();

    let flavor = agent.flavor();
    assert!(!flavor.cassandra().is_enabled());
    assert!(flavor.rpc().health_rpc().readiness());

    agent.stop().unwrap();
}

#[test]
fn test_agent_enables_cassandra_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"endpoints = ["10.1.1.1", "10.1.1.2"]"#).unwrap();
    writeln!(file, "op_timeout_ms = 250").unwrap();

    let mut agent = Agent::new(FlavorCassandraRpc::new(config_with_cassandra_file(
        file.path(),
    )));
    agent.start().unwrap();

    let flavor = agent.flavor();
    let settings = flavor.cassandra().settings().unwrap();
    assert_eq!(
        settings.contact_points(),
        vec!["10.1.1.1:9042", "10.1.1.2:9042"]
    );
    assert_eq!(settings.op_timeout.as_millis(), 250);

    let status = flavor.rpc().local().status_check().reporter().agent_status();
    assert_eq!(status.state, OperationalState::Ok);
    assert_eq!(
        status.plugins[&PluginName::from("cassandra")].state,
        OperationalState::Ok
    );

    let liveness = flavor.rpc().health_rpc().liveness().unwrap();
    assert_eq!(liveness["plugins"]["cassandra"]["state"], "OK");

    agent.stop().unwrap();
    assert!(!agent.flavor().cassandra().is_enabled());
}

#[test]
fn test_invalid_cassandra_config_stops_startup() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "endpoints = []").unwrap();

    let mut agent = Agent::new(FlavorCassandraRpc::new(config_with_cassandra_file(
        file.path(),
    )));

    match agent.start() {
        Err(AgentError::PluginInit { name, source }) => {
            assert_eq!(name, "cassandra");
            assert!(matches!(source, PluginError::InvalidConfig(_)));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!agent.is_started());
    // Earlier plugins were closed again
    assert!(agent.flavor().rpc().http().endpoint().is_none());
}

#[test]
fn test_invalid_label_fails_injection() {
    let config = FlavorConfig {
        microservice_label: "no spaces allowed".to_string(),
        ..Default::default()
    };
    let mut agent = Agent::new(FlavorCassandraRpc::new(config));

    assert!(matches!(agent.start(), Err(AgentError::InjectionFailed)));
    assert!(agent.flavor().cassandra().deps.is_none());
}

#[test]
fn test_cassandra_config_env_reaches_plugin() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom-cassandra.toml",
            r#"endpoints = ["cassandra.local"]"#,
        )?;
        jail.set_env("CASSANDRA_CONFIG", "custom-cassandra.toml");

        let config: FlavorConfig = FlavorConfig::figment().extract()?;
        let mut flavor = FlavorCassandraRpc::new(config);
        assert!(flavor.inject());

        let mut agent = Agent::new(flavor);
        agent.start().expect("agent start");
        assert_eq!(
            agent
                .flavor()
                .cassandra()
                .settings()
                .map(|s| s.hosts.clone()),
            Some(vec!["cassandra.local".to_string()])
        );
        agent.stop().expect("agent stop");
        Ok(())
    });
}
