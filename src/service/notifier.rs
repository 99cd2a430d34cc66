//! Notification port and built-in notifiers.
//!
//! Notifications are fire-and-forget: delivery failure is logged, never
//! retried, and never propagated to the monitoring loop.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{Opportunity, TradeRecord};

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// Arbitrage opportunity detected and cleared for delivery.
    OpportunityDetected(OpportunityEvent),
    /// Execution completed (success or failure).
    ExecutionCompleted(ExecutionEvent),
}

/// Opportunity detection event.
#[derive(Debug, Clone)]
pub struct OpportunityEvent {
    pub instrument: String,
    pub buy_venue: String,
    pub sell_venue: String,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub profit_percent: Decimal,
    pub gross_profit: Decimal,
}

impl From<&Opportunity> for OpportunityEvent {
    fn from(opp: &Opportunity) -> Self {
        Self {
            instrument: opp.instrument().to_string(),
            buy_venue: opp.buy_venue().to_string(),
            sell_venue: opp.sell_venue().to_string(),
            buy_price: opp.buy_price(),
            sell_price: opp.sell_price(),
            profit_percent: opp.profit_percent(),
            gross_profit: opp.gross_profit(),
        }
    }
}

/// Execution result event.
#[derive(Debug, Clone)]
pub struct ExecutionEvent {
    pub instrument: String,
    pub success: bool,
    pub details: String,
}

impl ExecutionEvent {
    /// Build an event from a recorded trade.
    #[must_use]
    pub fn from_record(record: &TradeRecord) -> Self {
        Self {
            instrument: record.instrument.to_string(),
            success: true,
            details: format!(
                "bought {} at {}, sold {} at {}, profit {}",
                record.buy_venue, record.buy_price, record.sell_venue, record.sell_price,
                record.profit
            ),
        }
    }

    /// Build an event from a failed execution.
    #[must_use]
    pub fn from_failure(instrument: &str, error: impl std::fmt::Display) -> Self {
        Self {
            instrument: instrument.to_string(),
            success: false,
            details: error.to_string(),
        }
    }
}

/// Trait for notification handlers.
///
/// Implementations must be thread-safe and return quickly; slow transports
/// should spawn an async task.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::OpportunityDetected(e) => {
                info!(
                    instrument = %e.instrument,
                    buy = %e.buy_venue,
                    sell = %e.sell_venue,
                    profit_pct = %e.profit_percent,
                    profit = %e.gross_profit,
                    "Opportunity detected"
                );
            }
            Event::ExecutionCompleted(e) => {
                info!(
                    instrument = %e.instrument,
                    success = e.success,
                    details = %e.details,
                    "Execution completed"
                );
            }
        }
    }
}

/// Webhook notifier posting events as JSON to a configured endpoint.
///
/// Delivery runs on a spawned task so the monitoring loop never waits on
/// the transport.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    recipient: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, recipient: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            recipient,
        }
    }

    fn payload(&self, event: &Event) -> serde_json::Value {
        let body = match event {
            Event::OpportunityDetected(e) => json!({
                "kind": "opportunity",
                "instrument": e.instrument,
                "buy_venue": e.buy_venue,
                "sell_venue": e.sell_venue,
                "buy_price": e.buy_price.to_string(),
                "sell_price": e.sell_price.to_string(),
                "profit_percent": e.profit_percent.to_string(),
                "gross_profit": e.gross_profit.to_string(),
            }),
            Event::ExecutionCompleted(e) => json!({
                "kind": "execution",
                "instrument": e.instrument,
                "success": e.success,
                "details": e.details,
            }),
        };
        match &self.recipient {
            Some(recipient) => json!({ "recipient": recipient, "event": body }),
            None => json!({ "event": body }),
        }
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, event: Event) {
        let client = self.client.clone();
        let url = self.url.clone();
        let payload = self.payload(&event);

        tokio::spawn(async move {
            match client.post(&url).json(&payload).send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = %response.status(), "Webhook notification rejected");
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Webhook notification failed");
                }
            }
        });
    }
}
