//! Operator command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tabled::{Table, Tabled};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::domain::TradeRecord;
use crate::error::Result;
use crate::service::recorder::load_records;

#[derive(Debug, Parser)]
#[command(name = "arbwatch", about = "Cross-venue arbitrage monitor", version)]
pub struct Cli {
    /// Path to the config file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Begin monitoring; blocks until Ctrl-C. SIGUSR1 toggles auto-execution.
    Run {
        /// Enable automatic execution of top-ranked opportunities.
        #[arg(long)]
        auto_execute: bool,
    },
    /// Write the default config file and exit.
    Init,
    /// Print the persisted trade log.
    Trades {
        /// Path of the trade log; defaults to the configured path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "executed_at")]
    executed_at: String,
    instrument: String,
    buy: String,
    sell: String,
    buy_price: String,
    sell_price: String,
    amount: String,
    profit: String,
    status: String,
}

impl From<&TradeRecord> for TradeRow {
    fn from(record: &TradeRecord) -> Self {
        Self {
            executed_at: record.executed_at.to_rfc3339(),
            instrument: record.instrument.to_string(),
            buy: record.buy_venue.to_string(),
            sell: record.sell_venue.to_string(),
            buy_price: record.buy_price.to_string(),
            sell_price: record.sell_price.to_string(),
            amount: record.amount.to_string(),
            profit: record.profit.to_string(),
            status: format!("{:?}", record.status).to_lowercase(),
        }
    }
}

/// Render the persisted trade log as a table.
pub fn print_trades(log_path: &std::path::Path) -> Result<()> {
    let records = load_records(log_path)?;
    if records.is_empty() {
        println!("no trades recorded at {}", log_path.display());
        return Ok(());
    }
    let rows: Vec<TradeRow> = records.iter().map(TradeRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}
