//! Per-poll quote sample for one venue.

use chrono::{DateTime, Utc};

use super::ids::{Instrument, VenueId};
use super::money::Price;

/// Best bid and ask for an instrument on one venue.
///
/// Either side may be independently absent when the order book is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestBidAsk {
    pub bid: Option<Price>,
    pub ask: Option<Price>,
}

impl BestBidAsk {
    /// Create a quote with both sides present.
    pub fn new(bid: Price, ask: Price) -> Self {
        Self {
            bid: Some(bid),
            ask: Some(ask),
        }
    }

    /// Mid-price when both sides are present, otherwise whichever side exists.
    pub fn mid_or_side(&self) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / rust_decimal::Decimal::TWO),
            (Some(bid), None) => Some(bid),
            (None, Some(ask)) => Some(ask),
            (None, None) => None,
        }
    }
}

/// A sampled quote. Ephemeral: produced fresh on each poll and discarded
/// after the detection pass, never persisted directly.
#[derive(Debug, Clone)]
pub struct Quote {
    pub venue: VenueId,
    pub instrument: Instrument,
    pub book: BestBidAsk,
    pub sampled_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        venue: VenueId,
        instrument: Instrument,
        book: BestBidAsk,
        sampled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            venue,
            instrument,
            book,
            sampled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn mid_price_when_both_sides_present() {
        let book = BestBidAsk::new(dec!(100), dec!(102));
        assert_eq!(book.mid_or_side(), Some(dec!(101)));
    }

    #[test]
    fn falls_back_to_single_side() {
        let bid_only = BestBidAsk {
            bid: Some(dec!(99)),
            ask: None,
        };
        assert_eq!(bid_only.mid_or_side(), Some(dec!(99)));

        let ask_only = BestBidAsk {
            bid: None,
            ask: Some(dec!(101)),
        };
        assert_eq!(ask_only.mid_or_side(), Some(dec!(101)));
    }

    #[test]
    fn empty_book_has_no_price() {
        assert_eq!(BestBidAsk::default().mid_or_side(), None);
    }
}
