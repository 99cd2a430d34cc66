//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. When the file is absent a
//! documented default is written first and then loaded, so the first run
//! works out of the box. The webhook URL may be overridden through the
//! `ARBWATCH_WEBHOOK_URL` environment variable (loaded from `.env` via
//! dotenvy in the binary).

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::Sizing;
use crate::error::{ConfigError, Result};

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "arbwatch.toml";

/// Default config written on first run. Placeholder values are documented
/// inline so an operator can edit the file without reading the docs.
pub const DEFAULT_CONFIG: &str = r#"# arbwatch configuration
#
# Instruments are swept in the order listed, once per poll interval.
instruments = ["BTC/USD", "ETH/USD"]

# Path of the persisted trade log (JSON, fully rewritten per trade).
trade_log = "trades.json"

# Venues are polled in the order listed. The "simulated" kind is a built-in
# random-walk source; `skew` biases its quotes so venues can dislocate.
[[venues]]
id = "alpha"
kind = "simulated"
skew = 1.0

[[venues]]
id = "beta"
kind = "simulated"
skew = 1.004

[[venues]]
id = "gamma"
kind = "simulated"
skew = 0.997

[trading]
# Minimum fee-adjusted profit percent required to surface an opportunity.
min_profit_percent = 0.5
# Notional (quote currency) assumed when evaluating opportunities.
notional_amount = 1000.0
# Executed notional: every recorded trade uses this amount.
max_trade_amount = 100.0
# Taker fee percent charged per leg (round trip pays it twice).
fee_percent = 0.1

[monitor]
# Seconds between instrument sweeps.
poll_interval_secs = 2
# Per-venue quote timeout; a slow venue is excluded from the pass.
source_timeout_secs = 5
# Cool-down between repeated alerts for the same opportunity key.
alert_cooldown_secs = 600
# Execute the top-ranked opportunity automatically (also toggled at runtime
# with SIGUSR1).
auto_execute = false

[notifications]
enabled = false
# POST endpoint for alerts; leave empty to log only.
# Can also be set via the ARBWATCH_WEBHOOK_URL environment variable.
webhook_url = ""
recipient = "ops@example.com"

[logging]
level = "info"
format = "pretty"
"#;

/// Supported venue adapter kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    #[default]
    Simulated,
}

/// One configured venue.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueConfig {
    pub id: String,
    #[serde(default)]
    pub kind: VenueKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Price bias of the simulated adapter (1.0 = unbiased).
    #[serde(default = "default_skew")]
    pub skew: f64,
}

fn default_enabled() -> bool {
    true
}

fn default_skew() -> f64 {
    1.0
}

/// Detection sizing and thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct TradingConfig {
    #[serde(default = "default_min_profit_percent")]
    pub min_profit_percent: Decimal,
    #[serde(default = "default_notional_amount")]
    pub notional_amount: Decimal,
    #[serde(default = "default_max_trade_amount")]
    pub max_trade_amount: Decimal,
    #[serde(default = "default_fee_percent")]
    pub fee_percent: Decimal,
}

fn default_min_profit_percent() -> Decimal {
    dec!(0.5)
}

fn default_notional_amount() -> Decimal {
    dec!(1000)
}

fn default_max_trade_amount() -> Decimal {
    dec!(100)
}

fn default_fee_percent() -> Decimal {
    dec!(0.1)
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            min_profit_percent: default_min_profit_percent(),
            notional_amount: default_notional_amount(),
            max_trade_amount: default_max_trade_amount(),
            fee_percent: default_fee_percent(),
        }
    }
}

impl TradingConfig {
    /// Per-leg fee as a rate (0.1% -> 0.001).
    #[must_use]
    pub fn fee_rate(&self) -> Decimal {
        self.fee_percent / Decimal::ONE_HUNDRED
    }

    /// Detection sizing derived from this config.
    #[must_use]
    pub fn sizing(&self) -> Sizing {
        Sizing {
            notional: self.notional_amount,
            fee_rate: self.fee_rate(),
            min_profit_percent: self.min_profit_percent,
        }
    }
}

/// Monitoring loop cadence and timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_source_timeout_secs")]
    pub source_timeout_secs: u64,
    #[serde(default = "default_alert_cooldown_secs")]
    pub alert_cooldown_secs: u64,
    #[serde(default)]
    pub auto_execute: bool,
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_source_timeout_secs() -> u64 {
    5
}

fn default_alert_cooldown_secs() -> u64 {
    600
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            source_timeout_secs: default_source_timeout_secs(),
            alert_cooldown_secs: default_alert_cooldown_secs(),
            auto_execute: false,
        }
    }
}

/// Notification channel settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub instruments: Vec<String>,
    pub venues: Vec<VenueConfig>,
    #[serde(default = "default_trade_log")]
    pub trade_log: PathBuf,
    #[serde(default)]
    pub trading: TradingConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_trade_log() -> PathBuf {
    PathBuf::from("trades.json")
}

impl Config {
    /// Load a config file, failing if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // Webhook URL may carry credentials; allow overriding from the
        // environment instead of the config file.
        if let Ok(url) = std::env::var("ARBWATCH_WEBHOOK_URL") {
            if !url.is_empty() {
                config.notifications.webhook_url = Some(url);
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Load a config file, writing the documented default first when absent.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            Self::write_default(path)?;
        }
        Self::load(path)
    }

    /// Write the default config file, refusing to clobber an existing one.
    ///
    /// First-run synthesis in [`load_or_init`](Self::load_or_init) only
    /// writes when the file is absent; an explicit `init` gets the same
    /// guarantee so it can never destroy an edited configuration.
    pub fn init_default(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        Self::write_default(path)
    }

    /// Write the default config file.
    pub fn write_default(path: &Path) -> Result<()> {
        std::fs::write(path, DEFAULT_CONFIG).map_err(ConfigError::WriteFile)?;
        info!(path = %path.display(), "Wrote default configuration");
        Ok(())
    }

    /// Venues that are enabled, in configuration order.
    pub fn enabled_venues(&self) -> impl Iterator<Item = &VenueConfig> {
        self.venues.iter().filter(|v| v.enabled)
    }

    fn validate(&self) -> Result<()> {
        if self.instruments.is_empty() {
            return Err(ConfigError::MissingField {
                field: "instruments",
            }
            .into());
        }
        if self.enabled_venues().count() < 2 {
            return Err(ConfigError::InvalidValue {
                field: "venues",
                reason: "at least two enabled venues are required".into(),
            }
            .into());
        }
        if self.trading.max_trade_amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "trading.max_trade_amount",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.trading.notional_amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "trading.notional_amount",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.trading.fee_percent < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "trading.fee_percent",
                reason: "must not be negative".into(),
            }
            .into());
        }
        if self.monitor.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monitor.poll_interval_secs",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_config_parses_and_validates() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        config.validate().unwrap();

        assert_eq!(config.instruments, ["BTC/USD", "ETH/USD"]);
        assert_eq!(config.venues.len(), 3);
        assert_eq!(config.trading.min_profit_percent, dec!(0.5));
        assert_eq!(config.trading.fee_rate(), dec!(0.001));
        assert_eq!(config.monitor.poll_interval_secs, 2);
        assert!(!config.monitor.auto_execute);
        assert!(!config.notifications.enabled);
    }

    #[test]
    fn rejects_single_enabled_venue() {
        let toml = r#"
            instruments = ["BTC/USD"]
            [[venues]]
            id = "alpha"
            [[venues]]
            id = "beta"
            enabled = false
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "venues", .. })
        ));
    }

    #[test]
    fn rejects_empty_instruments() {
        let toml = r#"
            instruments = []
            [[venues]]
            id = "alpha"
            [[venues]]
            id = "beta"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "instruments"
            })
        ));
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let toml = r#"
            instruments = ["BTC/USD"]
            [[venues]]
            id = "alpha"
            [[venues]]
            id = "beta"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.trade_log, PathBuf::from("trades.json"));
        assert_eq!(config.trading.notional_amount, dec!(1000));
        assert_eq!(config.monitor.alert_cooldown_secs, 600);
        assert_eq!(config.venues[0].kind, VenueKind::Simulated);
        assert!(config.venues[0].enabled);
    }
}
