//! Entry and stop resolution.
//!
//! Both resolvers are ordered rule chains. A rule pairs a selector (does the
//! rule apply, and which structure artifact does it match?) with a resolver
//! (turn the matched artifact into a price). Rules are evaluated in slice
//! order and the first selector that matches wins; the last rule of each
//! chain always matches. The rule slices are public so the priority order can
//! be inspected and tested directly.
//!
//! The two chains are independent: the stop chain re-selects its own artifact
//! rather than reusing whatever the entry chain matched.

pub mod entry;
pub mod stop;

pub use entry::{resolve_entry, EntryResolution, EntryRule, ENTRY_RULES};
pub use stop::{resolve_stop, StopResolution, StopRule, STOP_RULES};

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::{Direction, FairValueGap, OrderBlock, SwingPoint};
use crate::structure::MarketStructure;

/// Inputs shared by both chains.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub direction: Direction,
    pub structure: &'a MarketStructure,
    pub current_price: f64,
    pub atr: f64,
    pub config: &'a EngineConfig,
}

/// The structure artifact a rule matched, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "artifact", rename_all = "snake_case")]
pub enum Artifact {
    FairValueGap(FairValueGap),
    OrderBlock(OrderBlock),
    SwingPoint(SwingPoint),
    None,
}

fn select_gap(ctx: &ResolveContext<'_>) -> Option<Artifact> {
    ctx.structure
        .latest_gap(ctx.direction.matching_kind())
        .cloned()
        .map(Artifact::FairValueGap)
}

fn select_order_block(ctx: &ResolveContext<'_>) -> Option<Artifact> {
    ctx.structure
        .latest_order_block(ctx.direction.matching_kind())
        .cloned()
        .map(Artifact::OrderBlock)
}

fn select_swing(ctx: &ResolveContext<'_>) -> Option<Artifact> {
    ctx.structure
        .latest_swing(ctx.direction)
        .cloned()
        .map(Artifact::SwingPoint)
}

fn select_always(_: &ResolveContext<'_>) -> Option<Artifact> {
    Some(Artifact::None)
}

/// Price formatting for rationale strings, scaled to the price magnitude.
pub(crate) fn fmt_price(price: f64) -> String {
    let abs = price.abs();
    if abs >= 1000.0 {
        format!("{price:.2}")
    } else if abs >= 1.0 {
        format!("{price:.4}")
    } else {
        format!("{price:.8}")
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::{StructureKind, SwingKind};
    use crate::indicators::test_time;

    pub fn bullish_gap() -> FairValueGap {
        FairValueGap::new(StructureKind::Bullish, 102.0, 100.0, test_time(11), 12)
    }

    pub fn bearish_gap() -> FairValueGap {
        FairValueGap::new(StructureKind::Bearish, 110.0, 108.0, test_time(21), 22)
    }

    pub fn bullish_block() -> OrderBlock {
        OrderBlock {
            kind: StructureKind::Bullish,
            high: 98.0,
            low: 96.0,
            open: 97.8,
            close: 96.5,
            timestamp: test_time(30),
            footprint_index: 30,
        }
    }

    pub fn bearish_block() -> OrderBlock {
        OrderBlock {
            kind: StructureKind::Bearish,
            high: 112.0,
            low: 110.0,
            open: 110.2,
            close: 111.8,
            timestamp: test_time(31),
            footprint_index: 31,
        }
    }

    pub fn swing(kind: SwingKind, price: f64, index: usize) -> SwingPoint {
        SwingPoint {
            index,
            price,
            time: test_time(index),
            kind,
        }
    }

    pub fn ctx<'a>(
        direction: Direction,
        structure: &'a MarketStructure,
        current_price: f64,
        atr: f64,
        config: &'a EngineConfig,
    ) -> ResolveContext<'a> {
        ResolveContext {
            direction,
            structure,
            current_price,
            atr,
            config,
        }
    }
}
