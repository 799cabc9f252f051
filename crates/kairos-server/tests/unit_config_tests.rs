//! Configuration loading from files

use kairos_repository::RepositorySource;
use kairos_server::config::{LogFormat, ServerConfig};
use std::io::Write;

fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yaml_file() {
    let file = write_config(
        ".yaml",
        r#"
host: 0.0.0.0
port: 9090
log_format: json
cors_origins:
  - https://calendar.example.edu
repository:
  source: sqlite
  database_url: sqlite://campus.db
engine:
  scheduling:
    min_duration_minutes: 30
"#,
    );

    let config = ServerConfig::load_from(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.bind_address(), "0.0.0.0:9090");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.cors_origins, vec!["https://calendar.example.edu"]);
    assert_eq!(config.repository.source, RepositorySource::Sqlite);
    assert_eq!(config.repository.database_url.as_deref(), Some("sqlite://campus.db"));
    assert_eq!(config.engine.scheduling.min_duration_minutes, 30);
    assert!(config.engine.scheduling.check_within_batch);
}

#[test]
fn test_load_toml_file_keeps_defaults() {
    let file = write_config(
        ".toml",
        r#"
port = 3001

[engine.rules]
restrict_requester_types = false
"#,
    );

    let config = ServerConfig::load_from(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.port, 3001);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.repository.source, RepositorySource::Memory);
    assert!(!config.engine.rules.restrict_requester_types);
    assert_eq!(config.engine.scheduling.min_duration_minutes, 60);
}
