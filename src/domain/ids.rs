//! Identifier newtypes.
//!
//! Venue and instrument names travel as plain strings through config files,
//! tracing fields, and the persisted trade log. The newtypes exist so a
//! venue name can never be handed to something expecting an instrument
//! symbol, and so the registry, the alert key, and the history key all
//! agree on what they are keyed by.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of one quote venue.
///
/// Assigned by the operator in the config file and registered once at
/// startup; keys the source registry, alert suppression, and the buy/sell
/// legs of a trade record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(String);

impl VenueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VenueId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Tradable symbol in base/quote form, e.g. `BTC/USD`.
///
/// Opaque to the engine: instruments are compared for equality and swept in
/// config order, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Instrument {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Instrument {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
