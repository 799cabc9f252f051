//! Unit tests for RepositoryError types and error handling

use kairos_repository::{ConfigError, RepositoryConfig, RepositoryError, RepositorySource};

#[test]
fn test_error_corrupt_record_display() {
    let error = RepositoryError::CorruptRecord {
        table: "events".to_string(),
        message: "bad date 'x'".to_string(),
    };

    assert_eq!(error.to_string(), "Corrupt record in events: bad date 'x'");
}

#[test]
fn test_error_unsupported_display() {
    let error = RepositoryError::Unsupported("postgres".to_string());

    assert_eq!(error.to_string(), "Unsupported repository source: postgres");
}

#[test]
fn test_error_other_display() {
    let error = RepositoryError::Other("disk full".to_string());

    assert_eq!(error.to_string(), "Repository error: disk full");
}

#[test]
fn test_error_from_config_error() {
    let config_err = ConfigError::MissingField {
        backend: "Sqlite".to_string(),
        field: "database_url".to_string(),
    };
    let error: RepositoryError = config_err.into();

    assert!(matches!(error, RepositoryError::Config(_)));
    assert!(error.to_string().starts_with("Configuration error:"));
    assert!(error.to_string().contains("database_url"));
}

#[tokio::test]
async fn test_open_rejects_incomplete_config() {
    let config = RepositoryConfig {
        source: RepositorySource::Sqlite,
        database_url: Some(String::new()),
        max_connections: None,
    };

    match config.open().await {
        Err(RepositoryError::Config(ConfigError::MissingField { field, .. })) => {
            assert_eq!(field, "database_url")
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("incomplete config must not open"),
    }
}

#[cfg(not(feature = "sqlite"))]
#[tokio::test]
async fn test_sqlite_without_feature_is_unsupported() {
    let result = RepositoryConfig::sqlite("sqlite::memory:").open().await;
    assert!(matches!(result, Err(RepositoryError::Unsupported(_))));
}
