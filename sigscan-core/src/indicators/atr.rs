//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR here is the simple mean of the last `period` true-range values
//! (no Wilder smoothing). Needs period+1 bars; returns 0.0 otherwise.

use crate::domain::Bar;

/// True Range for each consecutive pair of bars.
///
/// The result has `bars.len() - 1` entries: `tr[i]` is the range of
/// `bars[i + 1]` against `bars[i].close`. The first bar has no previous close
/// and therefore no true range.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    bars.windows(2)
        .map(|w| {
            let (prev, cur) = (&w[0], &w[1]);
            let pc = prev.close;
            (cur.high - cur.low)
                .max((cur.high - pc).abs())
                .max((cur.low - pc).abs())
        })
        .collect()
}

/// ATR over the most recent `period` true ranges.
///
/// Insufficient history (fewer than `period + 1` bars) yields `0.0`, the
/// neutral default, rather than an error.
pub fn atr(bars: &[Bar], period: usize) -> f64 {
    if period == 0 || bars.len() <= period {
        return 0.0;
    }
    let window = &bars[bars.len() - (period + 1)..];
    let tr = true_range(window);
    tr.iter().sum::<f64>() / period as f64
}
