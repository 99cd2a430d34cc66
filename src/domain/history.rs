//! Bounded per-(instrument, venue) price history.
//!
//! The detector records a sample on every pass; a visualization reader may
//! snapshot on its own timer. Writes and reads share a `parking_lot` RwLock
//! and readers receive cloned snapshots, so neither side can observe a torn
//! sequence or block the other for long.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::ids::{Instrument, VenueId};
use super::money::Price;

/// One recorded sample.
pub type PricePoint = (DateTime<Utc>, Price);

/// Default number of samples retained per (instrument, venue) key.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HistoryKey {
    instrument: Instrument,
    venue: VenueId,
}

/// Bounded FIFO price history, capacity 100 per key by default.
#[derive(Debug)]
pub struct PriceHistory {
    capacity: usize,
    series: RwLock<HashMap<HistoryKey, VecDeque<PricePoint>>>,
}

impl PriceHistory {
    /// Create a history with the default per-key capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history with a custom per-key capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            series: RwLock::new(HashMap::new()),
        }
    }

    /// Append a sample, evicting the oldest entry once the key is full.
    pub fn record(&self, instrument: &Instrument, venue: &VenueId, price: Price, at: DateTime<Utc>) {
        let key = HistoryKey {
            instrument: instrument.clone(),
            venue: venue.clone(),
        };
        let mut series = self.series.write();
        let points = series.entry(key).or_default();
        points.push_back((at, price));
        while points.len() > self.capacity {
            points.pop_front();
        }
    }

    /// Snapshot every venue's series for one instrument, oldest first.
    ///
    /// Returns cloned data so the caller never holds the lock while reading.
    pub fn snapshot(&self, instrument: &Instrument) -> HashMap<VenueId, Vec<PricePoint>> {
        let series = self.series.read();
        series
            .iter()
            .filter(|(key, _)| &key.instrument == instrument)
            .map(|(key, points)| (key.venue.clone(), points.iter().copied().collect()))
            .collect()
    }

    /// Number of samples currently held for one key.
    pub fn len(&self, instrument: &Instrument, venue: &VenueId) -> usize {
        let key = HistoryKey {
            instrument: instrument.clone(),
            venue: venue.clone(),
        };
        self.series.read().get(&key).map_or(0, VecDeque::len)
    }

    /// True when no samples have been recorded at all.
    pub fn is_empty(&self) -> bool {
        self.series.read().values().all(VecDeque::is_empty)
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_time(offset_secs: i64) -> DateTime<Utc> {
        "2026-08-29T00:00:00Z".parse::<DateTime<Utc>>().unwrap() + Duration::seconds(offset_secs)
    }

    #[test]
    fn record_and_snapshot_in_order() {
        let history = PriceHistory::new();
        let instrument = Instrument::new("BTC/USD");
        let venue = VenueId::new("alpha");

        history.record(&instrument, &venue, dec!(100), sample_time(0));
        history.record(&instrument, &venue, dec!(101), sample_time(1));

        let snapshot = history.snapshot(&instrument);
        let points = &snapshot[&venue];
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].1, dec!(100));
        assert_eq!(points[1].1, dec!(101));
    }

    #[test]
    fn fifo_eviction_keeps_most_recent_capacity_entries() {
        let history = PriceHistory::new();
        let instrument = Instrument::new("BTC/USD");
        let venue = VenueId::new("alpha");

        for i in 0..250i64 {
            history.record(&instrument, &venue, Decimal::from(i), sample_time(i));
        }

        assert_eq!(history.len(&instrument, &venue), DEFAULT_CAPACITY);
        let snapshot = history.snapshot(&instrument);
        let points = &snapshot[&venue];
        // Oldest retained sample is 250 - 100 = 150, newest is 249.
        assert_eq!(points[0].1, Decimal::from(150));
        assert_eq!(points[99].1, Decimal::from(249));
    }

    #[test]
    fn keys_are_independent() {
        let history = PriceHistory::with_capacity(2);
        let btc = Instrument::new("BTC/USD");
        let eth = Instrument::new("ETH/USD");
        let venue = VenueId::new("alpha");

        history.record(&btc, &venue, dec!(1), sample_time(0));
        history.record(&eth, &venue, dec!(2), sample_time(0));

        assert_eq!(history.len(&btc, &venue), 1);
        assert_eq!(history.len(&eth, &venue), 1);
        assert!(history.snapshot(&btc).contains_key(&venue));
        assert_eq!(history.snapshot(&btc)[&venue][0].1, dec!(1));
    }

    #[test]
    fn snapshot_of_unknown_instrument_is_empty() {
        let history = PriceHistory::new();
        assert!(history.snapshot(&Instrument::new("XRP/USD")).is_empty());
        assert!(history.is_empty());
    }
}
