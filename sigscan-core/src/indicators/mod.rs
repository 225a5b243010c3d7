//! Indicator library: stateless numeric functions over a bar sequence.
//!
//! Each function reads only the tail of the sequence it needs and degrades to
//! a neutral default on insufficient history instead of failing:
//! ATR → 0.0, RSI → 50.0, SMA → `None`.

pub mod atr;
pub mod rsi;
pub mod sma;

pub use atr::{atr, true_range};
pub use rsi::{rsi, NEUTRAL_RSI};
pub use sma::sma;

use crate::config::IndicatorParams;
use crate::domain::Bar;
use serde::{Deserialize, Serialize};

/// Latest indicator readings for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub atr: f64,
    pub rsi: f64,
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn compute(bars: &[Bar], params: &IndicatorParams) -> Self {
        Self {
            atr: atr(bars, params.atr_period),
            rsi: rsi(bars, params.rsi_period),
            sma_fast: sma(bars, params.sma_fast),
            sma_slow: sma(bars, params.sma_slow),
        }
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                time: test_time(i),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            time: test_time(i),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}

/// Four-hour spaced timestamps starting 2024-01-01.
#[cfg(test)]
pub fn test_time(i: usize) -> chrono::DateTime<chrono::Utc> {
    use chrono::TimeZone;
    let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    start + chrono::Duration::hours(4 * i as i64)
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
