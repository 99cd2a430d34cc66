//! Alert deduplication with a per-key cool-down window.
//!
//! The key is (instrument, buy venue, sell venue); a reversal of roles is a
//! distinct key and is not suppressed by a forward-direction alert.
//!
//! The last-notified timestamp is refreshed on *every* call, before and
//! independent of the verdict, and independent of whether the notification
//! channel is enabled. Repeated sub-cool-down checks therefore keep
//! extending suppression; a key only fires again after a quiet gap.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::domain::{Instrument, Opportunity, VenueId};

/// Default cool-down between repeated alerts for the same key.
pub const DEFAULT_COOLDOWN_SECS: i64 = 600;

/// Suppression key: one directed venue pair for one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub instrument: Instrument,
    pub buy_venue: VenueId,
    pub sell_venue: VenueId,
}

impl From<&Opportunity> for AlertKey {
    fn from(opportunity: &Opportunity) -> Self {
        Self {
            instrument: opportunity.instrument().clone(),
            buy_venue: opportunity.buy_venue().clone(),
            sell_venue: opportunity.sell_venue().clone(),
        }
    }
}

/// Suppresses repeat alerts for the same key within a cool-down window.
///
/// The table grows with key cardinality, which is bounded by
/// instruments × venues², so no eviction is needed.
pub struct AlertDeduplicator {
    cooldown: Duration,
    last_notified: Mutex<HashMap<AlertKey, DateTime<Utc>>>,
}

impl AlertDeduplicator {
    /// Create a deduplicator with the default 600 second window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cooldown(Duration::seconds(DEFAULT_COOLDOWN_SECS))
    }

    /// Create a deduplicator with a custom window.
    #[must_use]
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_notified: Mutex::new(HashMap::new()),
        }
    }

    /// Decide whether this opportunity's alert should be delivered now.
    ///
    /// Always refreshes the key's timestamp, even when the verdict is
    /// "suppressed" and even when the caller will skip delivery because the
    /// channel is disabled.
    pub fn should_notify(&self, opportunity: &Opportunity) -> bool {
        self.should_notify_at(AlertKey::from(opportunity), Utc::now())
    }

    /// Clock-injected variant of [`should_notify`](Self::should_notify).
    pub fn should_notify_at(&self, key: AlertKey, now: DateTime<Utc>) -> bool {
        let mut table = self.last_notified.lock();
        let previous = table.insert(key, now);
        match previous {
            Some(last) => now - last >= self.cooldown,
            None => true,
        }
    }

    /// Number of keys ever seen.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.last_notified.lock().len()
    }
}

impl Default for AlertDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}
