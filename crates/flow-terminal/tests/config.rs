// crates/flow-terminal/tests/config.rs
use std::path::PathBuf;
use std::time::Duration;

use flow_terminal::config::{ClientConfig, ConfigError};

#[test]
fn defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, "http://127.0.0.1:8080");
    assert_eq!(config.page_size, 100);
    assert_eq!(config.poll_interval(), Duration::from_secs(2));
    assert_eq!(config.settings_path, PathBuf::from("flow-settings.json"));
    assert_eq!(config.log_file, None);

    let sync = config.sync_config();
    assert_eq!(sync.page_size, 100);
    assert_eq!(sync.load_more_debounce, Duration::from_millis(500));
    assert_eq!(sync.request_timeout, Duration::from_secs(10));
}

#[test]
fn no_path_means_defaults() {
    assert_eq!(ClientConfig::load(None).unwrap(), ClientConfig::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = ClientConfig::from_toml_str(
        r#"
        base_url = "http://10.0.0.5:9000"
        poll_interval_ms = 5000
        log_file = "/tmp/flow.log"
        "#,
    )
    .unwrap();

    assert_eq!(config.base_url, "http://10.0.0.5:9000");
    assert_eq!(config.poll_interval(), Duration::from_secs(5));
    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/flow.log")));
    assert_eq!(config.page_size, 100);
    assert_eq!(config.request_timeout_ms, 10_000);
}

#[test]
fn zero_page_size_is_rejected() {
    let err = ClientConfig::from_toml_str("page_size = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn zero_request_timeout_is_rejected() {
    let err = ClientConfig::from_toml_str("request_timeout_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let config = ClientConfig {
        request_timeout_ms: 0,
        ..ClientConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = ClientConfig::from_toml_str("page_size = \"lots\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = ClientConfig::load(Some(std::path::Path::new("/nonexistent/flow.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
