//! Last-trade ticker snapshot supplied alongside the bar history.

use serde::{Deserialize, Serialize};

/// 24h rolling ticker for one instrument.
///
/// `last` is the current price the engine compares structure levels against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub last: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub change_percent: f64,
    pub base_volume: f64,
    pub quote_volume: f64,
}

impl Ticker {
    /// Ticker with only a last price; 24h fields mirror it and volumes are zero.
    pub fn from_last(last: f64) -> Self {
        Self {
            last,
            high_24h: last,
            low_24h: last,
            change_percent: 0.0,
            base_volume: 0.0,
            quote_volume: 0.0,
        }
    }

    /// A usable last price is finite and strictly positive.
    pub fn has_valid_last(&self) -> bool {
        self.last.is_finite() && self.last > 0.0
    }
}
