//! Application wiring.
//!
//! [`App::new`] turns a [`Config`] into the component graph — source
//! registry, detector, deduplicator, notifiers, recorder, monitoring loop —
//! with no ambient globals: every piece of state is owned by a component
//! instance and handed to the loop explicitly.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::config::{Config, VenueKind};
use crate::detector::OpportunityDetector;
use crate::domain::{Instrument, PriceHistory, VenueId};
use crate::error::Result;
use crate::service::{
    AlertDeduplicator, ExecutionRecorder, LogNotifier, NotifierRegistry, PaperExecutor,
    WebhookNotifier,
};
use crate::source::{SimulatedSource, SourceRegistry};

mod monitor;
mod state;

pub use monitor::MonitorLoop;
pub use state::{AppState, MonitorState};

/// Per-poll volatility of the built-in simulated venues.
const SIMULATED_VOLATILITY: f64 = 0.005;

/// Assembled application.
pub struct App {
    monitor: MonitorLoop,
    state: Arc<AppState>,
    history: Arc<PriceHistory>,
}

impl App {
    /// Wire all components from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let state = Arc::new(AppState::new(config.monitor.auto_execute));
        let history = Arc::new(PriceHistory::new());

        let sources = Arc::new(build_source_registry(&config));
        info!(venues = sources.len(), "Quote sources initialized");

        let detector = OpportunityDetector::new(
            sources,
            history.clone(),
            config.trading.sizing(),
            Duration::from_secs(config.monitor.source_timeout_secs),
        );

        let dedup = AlertDeduplicator::with_cooldown(chrono::Duration::seconds(
            config.monitor.alert_cooldown_secs as i64,
        ));

        let notifiers = Arc::new(build_notifier_registry(&config));
        info!(notifiers = notifiers.len(), "Notifiers initialized");

        let recorder = Arc::new(ExecutionRecorder::open(
            Box::new(PaperExecutor),
            config.trading.max_trade_amount,
            &config.trade_log,
        )?);

        let instruments: Vec<Instrument> = config
            .instruments
            .iter()
            .map(|s| Instrument::new(s.clone()))
            .collect();

        let monitor = MonitorLoop::new(
            detector,
            dedup,
            notifiers,
            recorder,
            state.clone(),
            instruments,
            Duration::from_secs(config.monitor.poll_interval_secs),
            config.notifications.enabled,
        );

        Ok(Self {
            monitor,
            state,
            history,
        })
    }

    /// Shared runtime state handle (auto-execution toggle, loop state).
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Read-only price history handle for visualization readers.
    pub fn history(&self) -> Arc<PriceHistory> {
        self.history.clone()
    }

    /// Begin monitoring. Blocks the calling task until the shutdown channel
    /// fires.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> Result<()> {
        self.monitor.run(shutdown).await
    }
}

/// Build the source registry from the enabled venues, in config order.
fn build_source_registry(config: &Config) -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    for venue in config.enabled_venues() {
        match venue.kind {
            VenueKind::Simulated => {
                registry.register(
                    VenueId::new(venue.id.clone()),
                    Arc::new(SimulatedSource::new(venue.skew, SIMULATED_VOLATILITY)),
                );
            }
        }
    }
    registry
}

/// Build the notifier registry from configuration.
fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();

    // Always log events, whether or not the alert channel is enabled.
    registry.register(Box::new(LogNotifier));

    if config.notifications.enabled {
        match config.notifications.webhook_url.as_deref() {
            Some(url) if !url.is_empty() => {
                registry.register(Box::new(WebhookNotifier::new(
                    url,
                    config.notifications.recipient.clone(),
                )));
                info!("Webhook notifier enabled");
            }
            _ => {
                info!("Notifications enabled without webhook_url, logging only");
            }
        }
    }

    registry
}
