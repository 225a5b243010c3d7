//! OHLCV candle, the unit every detector and indicator reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single instrument over one timeframe period.
///
/// Sequences handed to the engine are strictly ascending by `time` with no
/// duplicate timestamps. Detection functions do not re-sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLC field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }

    /// Closed above its open.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Closed below its open.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

/// Returns true if `bars` is strictly ascending by time.
pub fn is_strictly_ascending(bars: &[Bar]) -> bool {
    bars.windows(2).all(|w| w[0].time < w[1].time)
}
