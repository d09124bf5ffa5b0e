// Configuration tests
// Author: Gabriel Demetrios Lafis

use std::io::Write;

use api_ingestion_engine::utils::Config;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.client.timeout_ms, 30_000);
    assert_eq!(config.rate_limit.max_requests, 5);
    assert_eq!(config.rate_limit.window_ms, 60_000);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_json_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();

    write!(
        file,
        r#"{{"client":{{"timeout_ms":5000}},"rate_limit":{{"max_requests":2,"window_ms":1000}},"logging":{{"level":"debug","file":null}}}}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.client.timeout_ms, 5000);
    assert_eq!(config.rate_limit.max_requests, 2);
    assert_eq!(config.rate_limit.window_ms, 1000);
    assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
}

#[test]
fn test_config_from_yaml_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();

    write!(
        file,
        "client:\n  timeout_ms: 1000\nrate_limit:\n  max_requests: 1\n  window_ms: 500\nlogging:\n  level: warn\n  file: null\n"
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.client.timeout_ms, 1000);
    assert_eq!(config.rate_limit.max_requests, 1);
    assert_eq!(config.log_level_filter(), log::LevelFilter::Warn);
}

#[test]
fn test_config_rejects_unknown_extension() {
    let file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_config_validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.client.timeout_ms = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validate_rejects_zero_window() {
    let mut config = Config::default();
    config.rate_limit.window_ms = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_config_unknown_level_falls_back_to_info() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();

    assert_eq!(config.log_level_filter(), log::LevelFilter::Info);
}
