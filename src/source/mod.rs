//! Quote source abstraction.
//!
//! These traits define the interface any venue adapter must provide. The
//! actual wire protocol for a real venue lives behind an implementation of
//! [`QuoteSource`]; adapters are selected at startup by a [`SourceRegistry`]
//! keyed on venue identifier.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{BestBidAsk, Instrument, Price, VenueId};
use crate::error::SourceError;

mod simulated;

pub use simulated::SimulatedSource;

/// A venue adapter: returns current prices for an instrument, or a failure.
///
/// Calls may block on I/O; the detector wraps every call in a timeout, so
/// implementations do not need their own. A failure only excludes the venue
/// from the current detection pass.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Last traded (or reference) price, `None` when unknown.
    async fn get_ticker(&self, instrument: &Instrument) -> Result<Option<Price>, SourceError>;

    /// Best bid and ask. Either side may be independently absent when the
    /// order book is empty.
    async fn get_best_bid_ask(&self, instrument: &Instrument) -> Result<BestBidAsk, SourceError>;

    /// Adapter name for logging.
    fn name(&self) -> &'static str;
}

/// Registry of enabled venues, in configuration order.
///
/// Detection iterates venues in this order, which makes pair discovery (and
/// therefore tie-breaking among equal-profit opportunities) deterministic.
pub struct SourceRegistry {
    venues: Vec<(VenueId, Arc<dyn QuoteSource>)>,
}

impl SourceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { venues: Vec::new() }
    }

    /// Register a venue adapter. Later registrations with the same ID are
    /// ignored; the first adapter wins.
    pub fn register(&mut self, venue: VenueId, source: Arc<dyn QuoteSource>) {
        if self.get(&venue).is_none() {
            self.venues.push((venue, source));
        }
    }

    /// Look up an adapter by venue ID.
    pub fn get(&self, venue: &VenueId) -> Option<&Arc<dyn QuoteSource>> {
        self.venues
            .iter()
            .find(|(id, _)| id == venue)
            .map(|(_, source)| source)
    }

    /// Iterate venues in registration order.
    pub fn venues(&self) -> impl Iterator<Item = (&VenueId, &Arc<dyn QuoteSource>)> {
        self.venues.iter().map(|(id, source)| (id, source))
    }

    /// Number of registered venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct FixedSource(BestBidAsk);

    #[async_trait]
    impl QuoteSource for FixedSource {
        async fn get_ticker(&self, _instrument: &Instrument) -> Result<Option<Price>, SourceError> {
            Ok(self.0.mid_or_side())
        }

        async fn get_best_bid_ask(
            &self,
            _instrument: &Instrument,
        ) -> Result<BestBidAsk, SourceError> {
            Ok(self.0)
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn registry_preserves_registration_order() {
        let mut registry = SourceRegistry::new();
        for id in ["alpha", "beta", "gamma"] {
            registry.register(
                VenueId::new(id),
                Arc::new(FixedSource(BestBidAsk::new(dec!(100), dec!(101)))),
            );
        }

        let order: Vec<_> = registry.venues().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, ["alpha", "beta", "gamma"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut registry = SourceRegistry::new();
        registry.register(
            VenueId::new("alpha"),
            Arc::new(FixedSource(BestBidAsk::new(dec!(100), dec!(101)))),
        );
        registry.register(
            VenueId::new("alpha"),
            Arc::new(FixedSource(BestBidAsk::new(dec!(200), dec!(201)))),
        );

        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn get_returns_registered_adapter() {
        let mut registry = SourceRegistry::new();
        registry.register(
            VenueId::new("alpha"),
            Arc::new(FixedSource(BestBidAsk::new(dec!(100), dec!(101)))),
        );

        let source = registry.get(&VenueId::new("alpha")).unwrap();
        let book = source
            .get_best_bid_ask(&Instrument::new("BTC/USD"))
            .await
            .unwrap();
        assert_eq!(book.bid, Some(dec!(100)));
        assert!(registry.get(&VenueId::new("missing")).is_none());
    }
}
