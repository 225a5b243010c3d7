//! Fair-value gap detection.
//!
//! For every consecutive triple (k1, k2, k3) the outer bars are compared:
//! - bullish when `k1.high < k3.low`: gap spans `[k1.high, k3.low]`
//! - bearish when `k1.low > k3.high`: gap spans `[k3.high, k1.low]`
//!
//! The middle bar is not compared. Both comparisons are strict, so every
//! emitted gap has `top > bottom`; NaN prices compare false and emit nothing.

use crate::domain::{Bar, FairValueGap, StructureKind};

/// All gaps in scan order. Nothing is ever removed; downstream code consults
/// the most recent matching gap.
pub fn fair_value_gaps(bars: &[Bar]) -> Vec<FairValueGap> {
    let mut gaps = Vec::new();
    for (i, w) in bars.windows(3).enumerate() {
        let (k1, k2, k3) = (&w[0], &w[1], &w[2]);
        let discovery_index = i + 2;

        if k1.high < k3.low {
            gaps.push(FairValueGap::new(
                StructureKind::Bullish,
                k3.low,
                k1.high,
                k2.time,
                discovery_index,
            ));
        } else if k1.low > k3.high {
            gaps.push(FairValueGap::new(
                StructureKind::Bearish,
                k1.low,
                k3.high,
                k2.time,
                discovery_index,
            ));
        }
    }
    gaps
}
