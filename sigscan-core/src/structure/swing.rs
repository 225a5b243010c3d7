//! Swing point detection.
//!
//! Index `i` is a swing high iff `bars[i].high` strictly exceeds the high of
//! every bar within `lookback` on both sides; swing lows are symmetric on lows.
//! Only interior indices `lookback <= i < n - lookback` are eligible, so the
//! most recent `lookback` bars can never confirm a swing.

use crate::domain::{Bar, SwingKind, SwingPoint};

/// Swing highs and lows, each in ascending index (time) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Swings {
    pub highs: Vec<SwingPoint>,
    pub lows: Vec<SwingPoint>,
}

pub fn swing_points(bars: &[Bar], lookback: usize) -> Swings {
    let mut swings = Swings::default();
    let n = bars.len();
    if lookback == 0 || n < lookback.saturating_mul(2).saturating_add(1) {
        return swings;
    }

    for i in lookback..n - lookback {
        let bar = &bars[i];
        let neighbours = (1..=lookback).flat_map(|j| [&bars[i - j], &bars[i + j]]);

        let (mut is_high, mut is_low) = (true, true);
        for other in neighbours {
            is_high &= bar.high > other.high;
            is_low &= bar.low < other.low;
            if !is_high && !is_low {
                break;
            }
        }

        if is_high {
            swings.highs.push(SwingPoint {
                index: i,
                price: bar.high,
                time: bar.time,
                kind: SwingKind::High,
            });
        }
        if is_low {
            swings.lows.push(SwingPoint {
                index: i,
                price: bar.low,
                time: bar.time,
                kind: SwingKind::Low,
            });
        }
    }

    swings
}
