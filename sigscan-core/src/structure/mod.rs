//! Market-structure detection: swing points, fair-value gaps, order blocks,
//! and breaks of structure.
//!
//! All detectors assume a strictly time-ascending bar sequence and are
//! undefined on unsorted input. They are pure functions; `analyze` runs all
//! four and bundles the results for the resolvers and the composer.

pub mod bos;
pub mod fvg;
pub mod order_block;
pub mod swing;

pub use bos::structure_breaks;
pub use fvg::fair_value_gaps;
pub use order_block::order_blocks;
pub use swing::{swing_points, Swings};

use crate::config::StructureParams;
use crate::domain::{
    Bar, Direction, FairValueGap, OrderBlock, StructureBreak, StructureKind, StructureSnapshot,
    SwingPoint,
};

/// Every structure artifact detected over one bar window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketStructure {
    pub swing_highs: Vec<SwingPoint>,
    pub swing_lows: Vec<SwingPoint>,
    pub fair_value_gaps: Vec<FairValueGap>,
    pub order_blocks: Vec<OrderBlock>,
    pub structure_breaks: Vec<StructureBreak>,
}

pub fn analyze(bars: &[Bar], params: &StructureParams) -> MarketStructure {
    let Swings { highs, lows } = swing_points(bars, params.swing_lookback);
    let structure_breaks = structure_breaks(bars, &highs, &lows);
    MarketStructure {
        fair_value_gaps: fair_value_gaps(bars),
        order_blocks: order_blocks(bars),
        swing_highs: highs,
        swing_lows: lows,
        structure_breaks,
    }
}

impl MarketStructure {
    /// Most recently discovered gap of the given kind.
    pub fn latest_gap(&self, kind: StructureKind) -> Option<&FairValueGap> {
        self.fair_value_gaps.iter().rev().find(|g| g.kind == kind)
    }

    /// Most recently detected order block of the given kind.
    pub fn latest_order_block(&self, kind: StructureKind) -> Option<&OrderBlock> {
        self.order_blocks.iter().rev().find(|b| b.kind == kind)
    }

    /// Most recent swing that supports a trade in `direction`: the last swing
    /// low for longs, the last swing high for shorts.
    pub fn latest_swing(&self, direction: Direction) -> Option<&SwingPoint> {
        match direction {
            Direction::Long => self.swing_lows.last(),
            Direction::Short => self.swing_highs.last(),
        }
    }

    /// Net vote of the `window` most recent gaps: (matching, opposing) counts.
    pub fn recent_gap_votes(&self, kind: StructureKind, window: usize) -> (usize, usize) {
        let start = self.fair_value_gaps.len().saturating_sub(window);
        self.fair_value_gaps[start..]
            .iter()
            .fold((0, 0), |(matching, opposing), g| {
                if g.kind == kind {
                    (matching + 1, opposing)
                } else {
                    (matching, opposing + 1)
                }
            })
    }

    /// Trimmed copy: the last `len` of each artifact list, all breaks.
    pub fn snapshot(&self, len: usize) -> StructureSnapshot {
        StructureSnapshot {
            fair_value_gaps: tail(&self.fair_value_gaps, len),
            order_blocks: tail(&self.order_blocks, len),
            swing_highs: tail(&self.swing_highs, len),
            swing_lows: tail(&self.swing_lows, len),
            structure_breaks: self.structure_breaks.clone(),
        }
    }
}

fn tail<T: Clone>(items: &[T], len: usize) -> Vec<T> {
    items[items.len().saturating_sub(len)..].to_vec()
}
