//! End-to-end: YAML configuration through bootstrap to command execution.

use std::io::Write;

use clap::Parser;
use serial_test::serial;
use tempfile::NamedTempFile;

use rebac_server::cli::{execute, Cli};
use rebac_server::{open_store, ServerConfig};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{contents}").unwrap();
    file
}

fn run(store: &rebac_domain::TripleStore, argv: &[&str]) -> (bool, String) {
    let cli = Cli::try_parse_from(std::iter::once("rebac").chain(argv.iter().copied())).unwrap();
    let mut out = Vec::new();
    let answer = execute(&cli.command, store, &mut out).unwrap();
    (answer, String::from_utf8(out).unwrap())
}

#[test]
#[serial]
fn test_configured_resolvers_drive_check() {
    let file = config_file(
        r#"
storage:
  backend: memory

resolvers:
  - subject_namespace: service
    role_namespace: team
"#,
    );
    let config = ServerConfig::load(file.path()).unwrap();
    let store = open_store(&config).unwrap();
    assert_eq!(store.resolver_count(), 1);

    run(&store, &["put", "team:ops", "member", "service:ci"]);
    run(&store, &["put", "team:ops", "deploy", "cluster:*"]);

    assert!(run(&store, &["check", "service:ci", "deploy", "cluster:prod"]).0);
    assert!(!run(&store, &["contains", "service:ci", "deploy", "cluster:prod"]).0);
    // The default user/role resolver was replaced by the configured list.
    run(&store, &["put", "role:admin", "member", "user:alice"]);
    run(&store, &["put", "role:admin", "deploy", "cluster:prod"]);
    assert!(!run(&store, &["check", "user:alice", "deploy", "cluster:prod"]).0);
}

#[test]
#[serial]
fn test_invalid_backend_is_rejected_before_bootstrap() {
    let file = config_file(
        r#"
storage:
  backend: postgres
"#,
    );
    let err = ServerConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("storage.backend"));
}

#[test]
#[serial]
fn test_env_only_configuration() {
    std::env::set_var("REBAC_LOGGING__LEVEL", "debug");
    let config = ServerConfig::from_env();
    std::env::remove_var("REBAC_LOGGING__LEVEL");

    let config = config.unwrap();
    assert_eq!(config.logging.level, "debug");

    let store = open_store(&config).unwrap();
    assert_eq!(store.count(), 0);
    assert_eq!(store.resolver_count(), 1);
}
