//! Order block detection.
//!
//! A 4-bar window (k0, k1, k2, k3) is scanned; k0 only anchors the window.
//! - Bullish: k1 and k2 close bearish, k2.low < k1.low, and k3 closes bullish
//!   above k2.high. The footprint is k2.
//! - Bearish: k1 and k2 close bullish, k2.high > k1.high, and k3 closes
//!   bearish below k2.low. The footprint is k2.
//!
//! `footprint_index` is always the index of k2 and the block prices are k2's
//! own OHLC; no adjacent bar is ever referenced.

use crate::domain::{Bar, OrderBlock, StructureKind};

pub fn order_blocks(bars: &[Bar]) -> Vec<OrderBlock> {
    let mut blocks = Vec::new();
    for (i, w) in bars.windows(4).enumerate() {
        let (k1, k2, k3) = (&w[1], &w[2], &w[3]);
        let footprint_index = i + 2;

        let kind = if k1.is_bearish()
            && k2.is_bearish()
            && k2.low < k1.low
            && k3.is_bullish()
            && k3.close > k2.high
        {
            StructureKind::Bullish
        } else if k1.is_bullish()
            && k2.is_bullish()
            && k2.high > k1.high
            && k3.is_bearish()
            && k3.close < k2.low
        {
            StructureKind::Bearish
        } else {
            continue;
        };

        blocks.push(OrderBlock {
            kind,
            high: k2.high,
            low: k2.low,
            open: k2.open,
            close: k2.close,
            timestamp: k2.time,
            footprint_index,
        });
    }
    blocks
}
