//! Cross-venue opportunity detection.
//!
//! For one instrument the detector samples every registered venue, writes
//! the price history, and evaluates all N×(N-1) ordered venue pairs so that
//! buy/sell role assignment stays explicit. Results come back sorted by
//! descending profit percent (stable, so discovery order breaks ties) and
//! truncated to the top five.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::{Instrument, Opportunity, OpportunityError, PriceHistory, Quote, Sizing};
use crate::error::SourceError;
use crate::source::SourceRegistry;

/// Maximum opportunities returned per detection pass.
const MAX_RESULTS: usize = 5;

/// Default per-venue sampling timeout.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Detects fee-adjusted arbitrage opportunities for configured instruments.
pub struct OpportunityDetector {
    sources: Arc<SourceRegistry>,
    history: Arc<PriceHistory>,
    sizing: Sizing,
    source_timeout: Duration,
}

impl OpportunityDetector {
    pub fn new(
        sources: Arc<SourceRegistry>,
        history: Arc<PriceHistory>,
        sizing: Sizing,
        source_timeout: Duration,
    ) -> Self {
        Self {
            sources,
            history,
            sizing,
            source_timeout,
        }
    }

    /// Run one detection pass for an instrument.
    ///
    /// A venue whose adapter fails, times out, or returns an empty book side
    /// is excluded from this pass only; the polling cadence provides retry.
    /// The price history is updated for every venue that returned a price,
    /// whether or not any opportunity was found.
    pub async fn detect(&self, instrument: &Instrument) -> Vec<Opportunity> {
        let quotes = self.sample(instrument).await;
        let detected_at = Utc::now();

        let mut opportunities = Vec::new();
        for buy in &quotes {
            for sell in &quotes {
                if buy.venue == sell.venue {
                    continue;
                }
                let (Some(buy_ask), Some(sell_bid)) = (buy.book.ask, sell.book.bid) else {
                    continue;
                };
                match Opportunity::evaluate(
                    instrument.clone(),
                    buy.venue.clone(),
                    buy_ask,
                    sell.venue.clone(),
                    sell_bid,
                    &self.sizing,
                    detected_at,
                ) {
                    Ok(opportunity) => opportunities.push(opportunity),
                    Err(OpportunityError::NonPositiveInput { field }) => {
                        warn!(
                            venue = %buy.venue,
                            field,
                            "Skipping pair with non-positive input"
                        );
                    }
                    // Unprofitable pairs are the common case, not a fault.
                    Err(_) => {}
                }
            }
        }

        // Stable sort keeps discovery order among equal-profit pairs.
        opportunities.sort_by(|a, b| b.profit_percent().cmp(&a.profit_percent()));
        opportunities.truncate(MAX_RESULTS);
        opportunities
    }

    /// Sample every registered venue, recording history as a side effect.
    async fn sample(&self, instrument: &Instrument) -> Vec<Quote> {
        let mut quotes = Vec::with_capacity(self.sources.len());

        for (venue, source) in self.sources.venues() {
            let book = match timeout(self.source_timeout, source.get_best_bid_ask(instrument)).await
            {
                Ok(Ok(book)) => book,
                Ok(Err(e)) => {
                    warn!(venue = %venue, instrument = %instrument, error = %e, "Venue excluded from pass");
                    continue;
                }
                Err(_) => {
                    let e = SourceError::Timeout(self.source_timeout);
                    warn!(venue = %venue, instrument = %instrument, error = %e, "Venue excluded from pass");
                    continue;
                }
            };

            let sampled_at = Utc::now();
            if let Some(price) = book.mid_or_side() {
                self.history.record(instrument, venue, price, sampled_at);
            }
            if book.bid.is_none() && book.ask.is_none() {
                debug!(venue = %venue, instrument = %instrument, "Empty book, venue excluded from pass");
                continue;
            }

            quotes.push(Quote::new(
                venue.clone(),
                instrument.clone(),
                book,
                sampled_at,
            ));
        }

        quotes
    }
}
