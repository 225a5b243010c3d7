//! Simple Moving Average (SMA).
//!
//! Mean of the last `period` closes. Fewer than `period` bars means the
//! average is unavailable (`None`), which callers treat as "no trend reading".

use crate::domain::Bar;

pub fn sma(bars: &[Bar], period: usize) -> Option<f64> {
    if period == 0 || bars.len() < period {
        return None;
    }
    let window = &bars[bars.len() - period..];
    Some(window.iter().map(|b| b.close).sum::<f64>() / period as f64)
}
