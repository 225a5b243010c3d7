//! Break of structure (BOS).
//!
//! Only the two most recent bars are examined, against the second-to-last
//! swing extreme of the matching kind:
//! - bullish: previous close <= level < latest close
//! - bearish: previous close >= level > latest close
//!
//! A break is `confirmed` when the latest bar closed in the break direction
//! (above its open for bullish, below for bearish).

use crate::domain::{Bar, StructureBreak, StructureKind, SwingPoint};

pub fn structure_breaks(
    bars: &[Bar],
    swing_highs: &[SwingPoint],
    swing_lows: &[SwingPoint],
) -> Vec<StructureBreak> {
    let mut breaks = Vec::new();
    let n = bars.len();
    if n < 2 {
        return breaks;
    }
    let (prev, last) = (&bars[n - 2], &bars[n - 1]);

    if let Some(level) = second_to_last(swing_highs) {
        if prev.close <= level && last.close > level {
            breaks.push(StructureBreak {
                kind: StructureKind::Bullish,
                level,
                timestamp: last.time,
                confirmed: last.is_bullish(),
            });
        }
    }

    if let Some(level) = second_to_last(swing_lows) {
        if prev.close >= level && last.close < level {
            breaks.push(StructureBreak {
                kind: StructureKind::Bearish,
                level,
                timestamp: last.time,
                confirmed: last.is_bearish(),
            });
        }
    }

    breaks
}

fn second_to_last(swings: &[SwingPoint]) -> Option<f64> {
    swings.len().checked_sub(2).map(|i| swings[i].price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SwingKind;
    use crate::indicators::{make_ohlc_bars, test_time};

    fn swing(price: f64, kind: SwingKind, index: usize) -> SwingPoint {
        SwingPoint {
            index,
            price,
            time: test_time(index),
            kind,
        }
    }

    #[test]
    fn bullish_break_over_prior_swing_high() {
        let bars = make_ohlc_bars(&[(99.0, 100.5, 98.0, 100.0), (100.0, 103.0, 99.5, 102.0)]);
        let highs = [swing(101.0, SwingKind::High, 0), swing(110.0, SwingKind::High, 1)];
        let breaks = structure_breaks(&bars, &highs, &[]);
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].kind, StructureKind::Bullish);
        assert_eq!(breaks[0].level, 101.0);
        assert!(breaks[0].confirmed);
        assert_eq!(breaks[0].timestamp, bars[1].time);
    }

    #[test]
    fn bullish_break_unconfirmed_on_down_close() {
        // Latest bar gaps up, closes above the level but below its open.
        let bars = make_ohlc_bars(&[(99.0, 100.5, 98.0, 100.0), (104.0, 105.0, 101.5, 102.0)]);
        let highs = [swing(101.0, SwingKind::High, 0), swing(110.0, SwingKind::High, 1)];
        let breaks = structure_breaks(&bars, &highs, &[]);
        assert_eq!(breaks.len(), 1);
        assert!(!breaks[0].confirmed);
    }

    #[test]
    fn no_break_when_already_above() {
        let bars = make_ohlc_bars(&[(101.0, 102.5, 100.0, 102.0), (102.0, 104.0, 101.5, 103.0)]);
        let highs = [swing(101.0, SwingKind::High, 0), swing(110.0, SwingKind::High, 1)];
        assert!(structure_breaks(&bars, &highs, &[]).is_empty());
    }

    #[test]
    fn bearish_break_under_prior_swing_low() {
        let bars = make_ohlc_bars(&[(101.0, 101.5, 99.5, 100.0), (100.0, 100.5, 96.0, 97.0)]);
        let lows = [swing(99.0, SwingKind::Low, 0), swing(90.0, SwingKind::Low, 1)];
        let breaks = structure_breaks(&bars, &[], &lows);
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].kind, StructureKind::Bearish);
        assert_eq!(breaks[0].level, 99.0);
        assert!(breaks[0].confirmed);
    }

    #[test]
    fn single_swing_is_not_enough() {
        let bars = make_ohlc_bars(&[(99.0, 100.5, 98.0, 100.0), (100.0, 103.0, 99.5, 102.0)]);
        let highs = [swing(101.0, SwingKind::High, 0)];
        assert!(structure_breaks(&bars, &highs, &[]).is_empty());
    }
}
