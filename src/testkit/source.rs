//! Mock quote sources for tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{BestBidAsk, Instrument, Price};
use crate::error::SourceError;
use crate::source::QuoteSource;

/// Replays a scripted sequence of books per instrument, repeating the final
/// entry once the script is exhausted.
pub struct ScriptedSource {
    scripts: Mutex<HashMap<Instrument, Script>>,
    fallback: Option<BestBidAsk>,
}

struct Script {
    books: Vec<BestBidAsk>,
    cursor: usize,
}

impl ScriptedSource {
    /// Source with no scripts; unknown instruments report an empty book
    /// unless a fallback is set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback: None,
        }
    }

    /// Source quoting the same book for every instrument, forever.
    #[must_use]
    pub fn fixed(bid: Price, ask: Price) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback: Some(BestBidAsk::new(bid, ask)),
        }
    }

    /// Source quoting one fixed book, with either side possibly absent.
    #[must_use]
    pub fn fixed_book(book: BestBidAsk) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback: Some(book),
        }
    }

    /// Add a scripted sequence for one instrument.
    #[must_use]
    pub fn with_script(self, instrument: Instrument, books: Vec<BestBidAsk>) -> Self {
        self.scripts
            .lock()
            .insert(instrument, Script { books, cursor: 0 });
        self
    }

    fn next_book(&self, instrument: &Instrument) -> BestBidAsk {
        let mut scripts = self.scripts.lock();
        if let Some(script) = scripts.get_mut(instrument) {
            let index = script.cursor.min(script.books.len().saturating_sub(1));
            script.cursor += 1;
            return script.books.get(index).copied().unwrap_or_default();
        }
        self.fallback.unwrap_or_default()
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for ScriptedSource {
    async fn get_ticker(&self, instrument: &Instrument) -> Result<Option<Price>, SourceError> {
        Ok(self.next_book(instrument).mid_or_side())
    }

    async fn get_best_bid_ask(&self, instrument: &Instrument) -> Result<BestBidAsk, SourceError> {
        Ok(self.next_book(instrument))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Always reports the venue as unavailable.
pub struct FailingSource;

#[async_trait]
impl QuoteSource for FailingSource {
    async fn get_ticker(&self, _instrument: &Instrument) -> Result<Option<Price>, SourceError> {
        Err(SourceError::Unavailable("scripted outage".into()))
    }

    async fn get_best_bid_ask(&self, _instrument: &Instrument) -> Result<BestBidAsk, SourceError> {
        Err(SourceError::Unavailable("scripted outage".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Sleeps for a fixed delay before answering, to exercise timeouts.
pub struct StallingSource {
    delay: Duration,
    book: BestBidAsk,
}

impl StallingSource {
    #[must_use]
    pub fn new(delay: Duration, book: BestBidAsk) -> Self {
        Self { delay, book }
    }
}

#[async_trait]
impl QuoteSource for StallingSource {
    async fn get_ticker(&self, _instrument: &Instrument) -> Result<Option<Price>, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.book.mid_or_side())
    }

    async fn get_best_bid_ask(&self, _instrument: &Instrument) -> Result<BestBidAsk, SourceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.book)
    }

    fn name(&self) -> &'static str {
        "stalling"
    }
}
