// Config loading and validation tests

use resmon::config::AppConfig;
use std::path::Path;
use std::time::Duration;

const VALID_CONFIG: &str = r#"
[server]
port = 5001
host = "0.0.0.0"

[publishing]
broadcast_capacity = 16

[monitoring]
stats_log_interval_secs = 30

[report]
output_dir = "out/reports"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 5001);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.publishing.broadcast_capacity, 16);
    assert_eq!(config.monitoring.stats_log_interval_secs, 30);
    assert_eq!(config.monitoring.stats_log_interval(), Duration::from_secs(30));
    assert_eq!(config.report.output_dir, Path::new("out/reports"));
}

#[test]
fn test_optional_sections_use_defaults() {
    let minimal = r#"
[server]
port = 5001
host = "127.0.0.1"

[publishing]
broadcast_capacity = 4
"#;
    let config = AppConfig::load_from_str(minimal).expect("load_from_str");
    assert_eq!(config.monitoring.stats_log_interval_secs, 60);
    assert_eq!(config.report.output_dir, Path::new("reports"));
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 5001", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_host() {
    let bad = VALID_CONFIG.replace("host = \"0.0.0.0\"", "host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.host"));
}

#[test]
fn test_config_validation_rejects_zero_broadcast_capacity() {
    let bad = VALID_CONFIG.replace("broadcast_capacity = 16", "broadcast_capacity = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("publishing.broadcast_capacity"));
}

#[test]
fn test_config_validation_rejects_zero_stats_interval() {
    let bad = VALID_CONFIG.replace("stats_log_interval_secs = 30", "stats_log_interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("monitoring.stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_empty_output_dir() {
    let bad = VALID_CONFIG.replace("output_dir = \"out/reports\"", "output_dir = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("report.output_dir"));
}

#[test]
fn test_config_missing_section_fails() {
    let bad = VALID_CONFIG.replace("[publishing]\nbroadcast_capacity = 16\n", "");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_repository_config_file_is_valid() {
    let s = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml"))
        .expect("read config.toml");
    AppConfig::load_from_str(&s).expect("config.toml must validate");
}
