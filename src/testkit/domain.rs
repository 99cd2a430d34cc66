//! Builders for domain primitives used across tests.

use chrono::Utc;
use rust_decimal_macros::dec;

use crate::domain::{Instrument, Opportunity, Price, Sizing, VenueId};

/// Canonical detection sizing: 1000 notional, 0.1% fee per leg, 0.5%
/// minimum profit.
#[must_use]
pub fn sizing() -> Sizing {
    Sizing {
        notional: dec!(1000),
        fee_rate: dec!(0.001),
        min_profit_percent: dec!(0.5),
    }
}

/// A valid opportunity between two venues at the given prices.
///
/// # Panics
///
/// Panics when the prices do not form a profitable pair under the canonical
/// sizing; tests should only build valid opportunities this way.
#[must_use]
pub fn opportunity(instrument: &str, buy: &str, buy_ask: Price, sell: &str, sell_bid: Price) -> Opportunity {
    Opportunity::evaluate(
        Instrument::new(instrument),
        VenueId::new(buy),
        buy_ask,
        VenueId::new(sell),
        sell_bid,
        &sizing(),
        Utc::now(),
    )
    .expect("test prices must form a valid opportunity")
}
