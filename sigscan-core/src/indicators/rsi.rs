//! Relative Strength Index (RSI).
//!
//! Simple (non-smoothed) form over exactly the last `period` close-to-close
//! transitions: average gain and average loss are plain means.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: insufficient bars → 50; avg_loss == 0 → 100.

use crate::domain::Bar;

/// Neutral RSI reported when there is not enough history.
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn rsi(bars: &[Bar], period: usize) -> f64 {
    if period == 0 || bars.len() <= period {
        return NEUTRAL_RSI;
    }

    let window = &bars[bars.len() - (period + 1)..];
    let mut gains = 0.0;
    let mut losses = 0.0;
    for w in window.windows(2) {
        let change = w[1].close - w[0].close;
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    compute_rsi(gains / period as f64, losses / period as f64)
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
