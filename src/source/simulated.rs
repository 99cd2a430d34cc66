//! Random-walk quote source for paper monitoring.
//!
//! Lets the binary run end to end with no venue credentials. Each venue
//! instance carries a persistent price bias (`skew`) so that two simulated
//! venues occasionally dislocate far enough to clear the fee hurdle.

use std::collections::HashMap;

use parking_lot::Mutex;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::QuoteSource;
use crate::domain::{BestBidAsk, Instrument, Price};
use crate::error::SourceError;

/// Half-spread applied around the walked mid, as a fraction.
const HALF_SPREAD: f64 = 0.0005;

/// Base mid-price for instruments that have not been sampled yet.
const BASE_PRICE: f64 = 100.0;

/// Simulated venue producing a bounded random walk per instrument.
pub struct SimulatedSource {
    /// Persistent multiplicative bias of this venue against the base price.
    skew: f64,
    /// Maximum per-poll move, as a fraction of the current mid.
    volatility: f64,
    mids: Mutex<HashMap<Instrument, f64>>,
}

impl SimulatedSource {
    /// Create a source with the given bias and per-poll volatility.
    ///
    /// `skew` of 1.0 is unbiased; 1.01 quotes ~1% rich. `volatility` of
    /// 0.005 moves the mid up to ±0.5% per poll.
    pub fn new(skew: f64, volatility: f64) -> Self {
        Self {
            skew,
            volatility,
            mids: Mutex::new(HashMap::new()),
        }
    }

    fn walk_mid(&self, instrument: &Instrument) -> f64 {
        let mut mids = self.mids.lock();
        let mid = mids
            .entry(instrument.clone())
            .or_insert(BASE_PRICE * self.skew);
        let step = rand::thread_rng().gen_range(-self.volatility..=self.volatility);
        *mid *= 1.0 + step;
        *mid
    }
}

impl Default for SimulatedSource {
    fn default() -> Self {
        Self::new(1.0, 0.005)
    }
}

#[async_trait::async_trait]
impl QuoteSource for SimulatedSource {
    async fn get_ticker(&self, instrument: &Instrument) -> Result<Option<Price>, SourceError> {
        let mid = self.walk_mid(instrument);
        Ok(Decimal::from_f64(mid).map(|p| p.round_dp(6)))
    }

    async fn get_best_bid_ask(&self, instrument: &Instrument) -> Result<BestBidAsk, SourceError> {
        let mid = self.walk_mid(instrument);
        let bid = Decimal::from_f64(mid * (1.0 - HALF_SPREAD))
            .ok_or_else(|| SourceError::Unavailable("non-finite simulated price".into()))?;
        let ask = Decimal::from_f64(mid * (1.0 + HALF_SPREAD))
            .ok_or_else(|| SourceError::Unavailable("non-finite simulated price".into()))?;
        Ok(BestBidAsk::new(bid.round_dp(6), ask.round_dp(6)))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn quotes_have_positive_spread() {
        let source = SimulatedSource::default();
        let instrument = Instrument::new("BTC/USD");

        for _ in 0..10 {
            let book = source.get_best_bid_ask(&instrument).await.unwrap();
            let (bid, ask) = (book.bid.unwrap(), book.ask.unwrap());
            assert!(ask > bid, "ask {ask} must exceed bid {bid}");
            assert!(bid > dec!(0));
        }
    }

    #[tokio::test]
    async fn skewed_venue_quotes_rich() {
        let rich = SimulatedSource::new(1.05, 0.0);
        let flat = SimulatedSource::new(1.0, 0.0);
        let instrument = Instrument::new("BTC/USD");

        let rich_book = rich.get_best_bid_ask(&instrument).await.unwrap();
        let flat_book = flat.get_best_bid_ask(&instrument).await.unwrap();
        assert!(rich_book.bid.unwrap() > flat_book.ask.unwrap());
    }

    #[tokio::test]
    async fn walk_is_shared_between_ticker_and_book() {
        let source = SimulatedSource::new(1.0, 0.0);
        let instrument = Instrument::new("ETH/USD");

        let ticker = source.get_ticker(&instrument).await.unwrap().unwrap();
        let book = source.get_best_bid_ask(&instrument).await.unwrap();
        assert!(book.bid.unwrap() < ticker && ticker < book.ask.unwrap());
    }
}
