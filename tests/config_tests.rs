//! Configuration loading, first-run default synthesis, and overrides.

use arbwatch::config::{Config, DEFAULT_CONFIG};
use arbwatch::error::{ConfigError, Error};
use rust_decimal_macros::dec;

#[test]
fn missing_file_triggers_default_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbwatch.toml");
    assert!(!path.exists());

    let config = Config::load_or_init(&path).unwrap();

    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    assert_eq!(config.instruments, ["BTC/USD", "ETH/USD"]);
    assert_eq!(config.trading.max_trade_amount, dec!(100));
}

#[test]
fn existing_file_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbwatch.toml");
    let custom = r#"
        instruments = ["SOL/USD"]
        [[venues]]
        id = "alpha"
        [[venues]]
        id = "beta"
        [trading]
        min_profit_percent = 1.25
    "#;
    std::fs::write(&path, custom).unwrap();

    let config = Config::load_or_init(&path).unwrap();
    assert_eq!(config.instruments, ["SOL/USD"]);
    assert_eq!(config.trading.min_profit_percent, dec!(1.25));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), custom);
}

#[test]
fn init_refuses_to_overwrite_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbwatch.toml");
    let edited = "instruments = [\"SOL/USD\"]\n";
    std::fs::write(&path, edited).unwrap();

    let err = Config::init_default(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::AlreadyExists { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), edited);
}

#[test]
fn init_writes_when_the_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbwatch.toml");

    Config::init_default(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
}

#[test]
fn load_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load(dir.path().join("absent.toml")).is_err());
}

#[test]
fn load_fails_on_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbwatch.toml");
    std::fs::write(&path, "instruments = [").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
fn webhook_url_can_come_from_the_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arbwatch.toml");
    std::fs::write(&path, DEFAULT_CONFIG).unwrap();

    std::env::set_var("ARBWATCH_WEBHOOK_URL", "http://localhost:9/hook");
    let config = Config::load(&path).unwrap();
    std::env::remove_var("ARBWATCH_WEBHOOK_URL");

    assert_eq!(
        config.notifications.webhook_url.as_deref(),
        Some("http://localhost:9/hook")
    );
}
