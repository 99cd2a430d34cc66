//! Opportunity type with validated construction.
//!
//! This module provides the `Opportunity` struct representing a detected
//! cross-venue arbitrage opportunity. [`Opportunity::evaluate`] is the only
//! way to obtain an instance: it computes the fee-adjusted round trip and
//! refuses to construct anything that is not profitable, so a value of this
//! type always satisfies `sell_price > buy_price` and
//! `profit_percent >= min_profit_percent`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use super::ids::{Instrument, VenueId};
use super::money::{Amount, Price};

/// Error returned when evaluating a venue pair fails to yield a valid
/// opportunity. Not an operational fault: the detector simply skips the pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpportunityError {
    /// The sell-side bid does not exceed the buy-side ask.
    #[error("sell bid {sell_bid} does not exceed buy ask {buy_ask}")]
    PriceInverted { buy_ask: Price, sell_bid: Price },

    /// The fee-adjusted profit is below the configured threshold.
    #[error("profit {profit_percent}% below minimum {min_profit_percent}%")]
    BelowMinProfit {
        profit_percent: Decimal,
        min_profit_percent: Decimal,
    },

    /// A price or the notional was zero or negative.
    #[error("non-positive input: {field}")]
    NonPositiveInput { field: &'static str },
}

/// Profitability thresholds and sizing used when evaluating venue pairs.
#[derive(Debug, Clone)]
pub struct Sizing {
    /// Notional amount (quote currency) assumed for the round trip.
    pub notional: Amount,
    /// Taker fee charged per leg, as a rate (0.001 = 0.1%).
    pub fee_rate: Decimal,
    /// Minimum fee-adjusted profit percent required to emit.
    pub min_profit_percent: Decimal,
}

/// A detected, fee-adjusted profitable price discrepancy between two venues.
///
/// Immutable once created; consumed by the alert deduplicator and the
/// execution recorder, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    instrument: Instrument,
    buy_venue: VenueId,
    sell_venue: VenueId,
    buy_price: Price,
    sell_price: Price,
    notional: Amount,
    fee_rate: Decimal,
    gross_profit: Decimal,
    profit_percent: Decimal,
    detected_at: DateTime<Utc>,
}

impl Opportunity {
    /// Evaluate a directed venue pair: buy at `buy_ask` on `buy_venue`, sell
    /// at `sell_bid` on `sell_venue`, with the taker fee charged on both
    /// legs.
    ///
    /// ```text
    /// bought  = (notional / buy_ask) * (1 - fee_rate)
    /// revenue = bought * sell_bid * (1 - fee_rate)
    /// profit  = revenue - notional
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `OpportunityError` when the pair is inverted, below the
    /// minimum profit threshold, or fed non-positive inputs.
    pub fn evaluate(
        instrument: Instrument,
        buy_venue: VenueId,
        buy_ask: Price,
        sell_venue: VenueId,
        sell_bid: Price,
        sizing: &Sizing,
        detected_at: DateTime<Utc>,
    ) -> Result<Self, OpportunityError> {
        if buy_ask <= Decimal::ZERO {
            return Err(OpportunityError::NonPositiveInput { field: "buy_ask" });
        }
        if sell_bid <= Decimal::ZERO {
            return Err(OpportunityError::NonPositiveInput { field: "sell_bid" });
        }
        if sizing.notional <= Decimal::ZERO {
            return Err(OpportunityError::NonPositiveInput { field: "notional" });
        }
        if sell_bid <= buy_ask {
            return Err(OpportunityError::PriceInverted { buy_ask, sell_bid });
        }

        let cost = sizing.notional;
        let fee_keep = Decimal::ONE - sizing.fee_rate;
        let bought = (cost / buy_ask) * fee_keep;
        let revenue = bought * sell_bid * fee_keep;
        let gross_profit = revenue - cost;
        let profit_percent = gross_profit / cost * Decimal::ONE_HUNDRED;

        if profit_percent < sizing.min_profit_percent {
            return Err(OpportunityError::BelowMinProfit {
                profit_percent,
                min_profit_percent: sizing.min_profit_percent,
            });
        }

        Ok(Self {
            instrument,
            buy_venue,
            sell_venue,
            buy_price: buy_ask,
            sell_price: sell_bid,
            notional: cost,
            fee_rate: sizing.fee_rate,
            gross_profit,
            profit_percent,
            detected_at,
        })
    }

    /// Get the instrument.
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Get the venue to buy on.
    pub fn buy_venue(&self) -> &VenueId {
        &self.buy_venue
    }

    /// Get the venue to sell on.
    pub fn sell_venue(&self) -> &VenueId {
        &self.sell_venue
    }

    /// Get the buy price (best ask on the buy venue).
    pub fn buy_price(&self) -> Price {
        self.buy_price
    }

    /// Get the sell price (best bid on the sell venue).
    pub fn sell_price(&self) -> Price {
        self.sell_price
    }

    /// Get the notional amount the round trip was sized with.
    pub fn notional(&self) -> Amount {
        self.notional
    }

    /// Get the per-leg fee rate used in the evaluation.
    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    /// Get the fee-adjusted profit in quote currency.
    pub fn gross_profit(&self) -> Decimal {
        self.gross_profit
    }

    /// Get the fee-adjusted profit as a percent of the notional.
    pub fn profit_percent(&self) -> Decimal {
        self.profit_percent
    }

    /// Get the detection timestamp.
    pub fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sizing() -> Sizing {
        Sizing {
            notional: dec!(1000),
            fee_rate: dec!(0.001),
            min_profit_percent: dec!(0.5),
        }
    }

    fn evaluate(buy_ask: Decimal, sell_bid: Decimal) -> Result<Opportunity, OpportunityError> {
        Opportunity::evaluate(
            Instrument::new("BTC/USD"),
            VenueId::new("alpha"),
            buy_ask,
            VenueId::new("beta"),
            sell_bid,
            &sizing(),
            Utc::now(),
        )
    }

    #[test]
    fn evaluate_computes_round_trip_with_double_fee() {
        // 1000 / 100 = 10 units, * 0.999 = 9.99 after buy fee.
        // 9.99 * 105 * 0.999 = 1047.90105 revenue after sell fee.
        let opp = evaluate(dec!(100), dec!(105)).unwrap();

        assert_eq!(opp.buy_price(), dec!(100));
        assert_eq!(opp.sell_price(), dec!(105));
        assert_eq!(opp.gross_profit(), dec!(47.90105));
        assert_eq!(opp.profit_percent(), dec!(4.790105));
    }

    #[test]
    fn rejects_inverted_prices() {
        let err = evaluate(dec!(105), dec!(100)).unwrap_err();
        assert!(matches!(err, OpportunityError::PriceInverted { .. }));
    }

    #[test]
    fn rejects_equal_prices() {
        let err = evaluate(dec!(100), dec!(100)).unwrap_err();
        assert!(matches!(err, OpportunityError::PriceInverted { .. }));
    }

    #[test]
    fn rejects_spread_eaten_by_fees() {
        // Raw spread is positive but the double fee pushes profit below 0.5%.
        let err = evaluate(dec!(100), dec!(100.50)).unwrap_err();
        assert!(matches!(err, OpportunityError::BelowMinProfit { .. }));
    }

    #[test]
    fn rejects_zero_prices_and_notional() {
        assert!(matches!(
            evaluate(dec!(0), dec!(100)).unwrap_err(),
            OpportunityError::NonPositiveInput { field: "buy_ask" }
        ));
        assert!(matches!(
            evaluate(dec!(100), dec!(0)).unwrap_err(),
            OpportunityError::NonPositiveInput { field: "sell_bid" }
        ));

        let zero_notional = Sizing {
            notional: dec!(0),
            ..sizing()
        };
        let err = Opportunity::evaluate(
            Instrument::new("BTC/USD"),
            VenueId::new("alpha"),
            dec!(100),
            VenueId::new("beta"),
            dec!(105),
            &zero_notional,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OpportunityError::NonPositiveInput { field: "notional" }
        ));
    }

    #[test]
    fn profit_at_exact_threshold_is_accepted() {
        // Zero fee makes the math exact: 100 -> 100.5 is exactly 0.5%.
        let exact = Sizing {
            fee_rate: dec!(0),
            ..sizing()
        };
        let opp = Opportunity::evaluate(
            Instrument::new("BTC/USD"),
            VenueId::new("alpha"),
            dec!(100),
            VenueId::new("beta"),
            dec!(100.5),
            &exact,
            Utc::now(),
        )
        .unwrap();
        assert_eq!(opp.profit_percent(), dec!(0.5));
    }
}
