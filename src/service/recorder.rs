//! Trade execution and idempotent history recording.
//!
//! The recorder submits the round trip through a [`TradeExecutor`], sizes
//! the record with the operator-configured maximum trade amount, appends it
//! to the in-memory history, and rewrites the persisted JSON snapshot in
//! full. The rewrite goes through a temp file renamed into place, so a crash
//! mid-save can never leave a partially written log.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::{Amount, Opportunity, TradeRecord};
use crate::error::{ExecutionError, Result};

/// Executor for submitting an arbitrage round trip to the venues.
#[async_trait]
pub trait TradeExecutor: Send + Sync {
    /// Submit both legs at the given notional.
    async fn submit(
        &self,
        opportunity: &Opportunity,
        amount: Amount,
    ) -> std::result::Result<(), ExecutionError>;

    /// Executor name for logging.
    fn name(&self) -> &'static str;
}

/// Paper executor: accepts every trade without touching a venue.
pub struct PaperExecutor;

#[async_trait]
impl TradeExecutor for PaperExecutor {
    async fn submit(
        &self,
        opportunity: &Opportunity,
        amount: Amount,
    ) -> std::result::Result<(), ExecutionError> {
        debug!(
            instrument = %opportunity.instrument(),
            buy = %opportunity.buy_venue(),
            sell = %opportunity.sell_venue(),
            amount = %amount,
            "Paper trade accepted"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "paper"
    }
}

/// Records executed trades to an append-only history with a fully rewritten,
/// atomically replaced JSON snapshot.
///
/// Full rewrite is O(n) per trade but keeps the file a complete, consistent
/// point-in-time view; trade frequency is low relative to detection
/// frequency.
pub struct ExecutionRecorder {
    executor: Box<dyn TradeExecutor>,
    max_trade_amount: Amount,
    log_path: PathBuf,
    records: Mutex<Vec<TradeRecord>>,
}

impl ExecutionRecorder {
    /// Open a recorder, loading any existing trade log so earlier records
    /// survive the full-rewrite persistence across restarts.
    pub fn open(
        executor: Box<dyn TradeExecutor>,
        max_trade_amount: Amount,
        log_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let log_path = log_path.into();
        let records = load_records(&log_path)?;
        if !records.is_empty() {
            info!(path = %log_path.display(), trades = records.len(), "Loaded existing trade log");
        }
        Ok(Self {
            executor,
            max_trade_amount,
            log_path,
            records: Mutex::new(records),
        })
    }

    /// Execute an opportunity at the configured maximum trade amount.
    ///
    /// On success the record is appended and the snapshot rewritten. On
    /// failure nothing is recorded and the prior snapshot is untouched; the
    /// error is reported to the caller, never retried here.
    pub async fn execute(&self, opportunity: &Opportunity) -> Result<TradeRecord> {
        self.executor
            .submit(opportunity, self.max_trade_amount)
            .await?;

        let record = TradeRecord::completed(opportunity, self.max_trade_amount, Utc::now());

        // The lock is held across the rewrite: concurrent executions must not
        // race the snapshot on disk behind the in-memory history.
        {
            let mut records = self.records.lock();
            records.push(record.clone());
            persist(&self.log_path, &records)?;
        }

        info!(
            instrument = %record.instrument,
            buy = %record.buy_venue,
            sell = %record.sell_venue,
            amount = %record.amount,
            profit = %record.profit,
            executor = self.executor.name(),
            "Trade recorded"
        );
        Ok(record)
    }

    /// Copy of the in-memory trade history, oldest first.
    pub fn records(&self) -> Vec<TradeRecord> {
        self.records.lock().clone()
    }

    /// Path of the persisted snapshot.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Read a persisted trade log, tolerating a missing file.
pub fn load_records(path: &Path) -> Result<Vec<TradeRecord>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Rewrite the snapshot through a temp file renamed into place.
fn persist(path: &Path, records: &[TradeRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
