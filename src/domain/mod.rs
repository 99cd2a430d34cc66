//! Venue-agnostic domain types: identifiers, quotes, opportunities, trades,
//! and the bounded price history.

pub mod history;
pub mod ids;
pub mod money;
pub mod opportunity;
pub mod quote;
pub mod trade;

pub use history::{PriceHistory, PricePoint};
pub use ids::{Instrument, VenueId};
pub use money::{Amount, Price};
pub use opportunity::{Opportunity, OpportunityError, Sizing};
pub use quote::{BestBidAsk, Quote};
pub use trade::{TradeRecord, TradeStatus};
