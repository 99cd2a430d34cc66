//! Executed trade records.
//!
//! A [`TradeRecord`] is the immutable, persisted outcome of acting on an
//! opportunity. Records are appended to an ordered history and serialized
//! as JSON with RFC 3339 timestamps, which sort correctly as text.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{Instrument, VenueId};
use super::money::{Amount, Price};
use super::opportunity::Opportunity;

/// Outcome of an execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Completed,
    Failed,
}

/// An immutable record of one executed (or simulated) arbitrage round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub instrument: Instrument,
    pub buy_venue: VenueId,
    pub sell_venue: VenueId,
    pub buy_price: Price,
    pub sell_price: Price,
    /// Executed notional. Always the operator-configured maximum trade
    /// amount; detection sizing is advisory only.
    pub amount: Amount,
    /// Fee-adjusted profit rescaled to the executed amount.
    pub profit: Decimal,
    pub executed_at: DateTime<Utc>,
    pub status: TradeStatus,
}

impl TradeRecord {
    /// Build a completed record from an opportunity, sized to the executed
    /// amount rather than the detection notional.
    pub fn completed(opportunity: &Opportunity, amount: Amount, executed_at: DateTime<Utc>) -> Self {
        let profit = opportunity.profit_percent() / Decimal::ONE_HUNDRED * amount;
        Self {
            instrument: opportunity.instrument().clone(),
            buy_venue: opportunity.buy_venue().clone(),
            sell_venue: opportunity.sell_venue().clone(),
            buy_price: opportunity.buy_price(),
            sell_price: opportunity.sell_price(),
            amount,
            profit,
            executed_at,
            status: TradeStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::opportunity::Sizing;
    use rust_decimal_macros::dec;

    fn opportunity() -> Opportunity {
        Opportunity::evaluate(
            Instrument::new("BTC/USD"),
            VenueId::new("alpha"),
            dec!(100),
            VenueId::new("beta"),
            dec!(105),
            &Sizing {
                notional: dec!(1000),
                fee_rate: dec!(0.001),
                min_profit_percent: dec!(0.5),
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn completed_record_rescales_profit_to_executed_amount() {
        let record = TradeRecord::completed(&opportunity(), dec!(500), Utc::now());

        assert_eq!(record.amount, dec!(500));
        // 4.790105% of 500
        assert_eq!(record.profit, dec!(23.950525));
        assert_eq!(record.status, TradeStatus::Completed);
    }

    #[test]
    fn serde_round_trip_preserves_record() {
        let record = TradeRecord::completed(&opportunity(), dec!(500), Utc::now());
        let json = serde_json::to_string(&record).unwrap();
        let back: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn executed_at_serializes_as_sortable_text() {
        let record = TradeRecord::completed(
            &opportunity(),
            dec!(500),
            "2026-08-29T12:00:00Z".parse().unwrap(),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("2026-08-29T12:00:00Z"));
    }
}
