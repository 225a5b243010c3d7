//! Protective stop resolution.
//!
//! Priority: fair-value gap far boundary → order block outer edge → swing
//! point → ATR multiple from entry. Every buffer pushes the stop further from
//! the entry, never closer.

use serde::{Deserialize, Serialize};

use super::{
    fmt_price, select_always, select_gap, select_order_block, select_swing, Artifact,
    ResolveContext,
};
use crate::domain::{Direction, StopType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopResolution {
    pub price: f64,
    pub stop_type: StopType,
    pub rationale: String,
    pub artifact: Artifact,
}

pub struct StopRule {
    pub name: &'static str,
    pub stop_type: StopType,
    pub select: fn(&ResolveContext<'_>) -> Option<Artifact>,
    pub resolve: fn(&ResolveContext<'_>, f64, Artifact) -> Option<StopResolution>,
}

/// Stop rules in priority order.
pub const STOP_RULES: &[StopRule] = &[
    StopRule {
        name: "fair_value_gap",
        stop_type: StopType::FvgBoundary,
        select: select_gap,
        resolve: gap_stop,
    },
    StopRule {
        name: "order_block",
        stop_type: StopType::OrderBlock,
        select: select_order_block,
        resolve: order_block_stop,
    },
    StopRule {
        name: "swing_point",
        stop_type: StopType::SwingPoint,
        select: select_swing,
        resolve: swing_stop,
    },
    StopRule {
        name: "atr_multiple",
        stop_type: StopType::AtrMultiple,
        select: select_always,
        resolve: atr_stop,
    },
];

/// Walk [`STOP_RULES`] for a position entered at `entry`.
pub fn resolve_stop(ctx: &ResolveContext<'_>, entry: f64) -> StopResolution {
    STOP_RULES
        .iter()
        .find_map(|rule| {
            (rule.select)(ctx).and_then(|artifact| (rule.resolve)(ctx, entry, artifact))
        })
        .unwrap_or_else(|| atr_fallback(ctx, entry))
}

/// Move `level` away from the trade by `pct`: down for longs, up for shorts.
fn widen(direction: Direction, level: f64, pct: f64) -> f64 {
    level * (1.0 - direction.sign() * pct)
}

fn gap_stop(ctx: &ResolveContext<'_>, _entry: f64, artifact: Artifact) -> Option<StopResolution> {
    let Artifact::FairValueGap(gap) = artifact else {
        return None;
    };
    let far = match ctx.direction {
        Direction::Long => gap.bottom,
        Direction::Short => gap.top,
    };
    let pct = ctx.config.stop.fvg_buffer_pct;
    let price = widen(ctx.direction, far, pct);
    Some(StopResolution {
        price,
        stop_type: StopType::FvgBoundary,
        rationale: format!(
            "beyond FVG boundary {} with {:.1}% buffer",
            fmt_price(far),
            pct * 100.0
        ),
        artifact: Artifact::FairValueGap(gap),
    })
}

fn order_block_stop(
    ctx: &ResolveContext<'_>,
    _entry: f64,
    artifact: Artifact,
) -> Option<StopResolution> {
    let Artifact::OrderBlock(block) = artifact else {
        return None;
    };
    let edge = match ctx.direction {
        Direction::Long => block.low,
        Direction::Short => block.high,
    };
    let pct = ctx.config.stop.order_block_buffer_pct;
    let price = widen(ctx.direction, edge, pct);
    Some(StopResolution {
        price,
        stop_type: StopType::OrderBlock,
        rationale: format!(
            "beyond order block edge {} (bar {}) with {:.1}% buffer",
            fmt_price(edge),
            block.footprint_index,
            pct * 100.0
        ),
        artifact: Artifact::OrderBlock(block),
    })
}

fn swing_stop(ctx: &ResolveContext<'_>, _entry: f64, artifact: Artifact) -> Option<StopResolution> {
    let Artifact::SwingPoint(swing) = artifact else {
        return None;
    };
    let pct = ctx.config.stop.swing_buffer_pct;
    let price = widen(ctx.direction, swing.price, pct);
    Some(StopResolution {
        price,
        stop_type: StopType::SwingPoint,
        rationale: format!(
            "beyond swing {} (bar {}) with {:.1}% buffer",
            fmt_price(swing.price),
            swing.index,
            pct * 100.0
        ),
        artifact: Artifact::SwingPoint(swing),
    })
}

fn atr_stop(ctx: &ResolveContext<'_>, entry: f64, _: Artifact) -> Option<StopResolution> {
    Some(atr_fallback(ctx, entry))
}

fn atr_fallback(ctx: &ResolveContext<'_>, entry: f64) -> StopResolution {
    let mult = ctx.config.stop.atr_multiplier;
    let price = entry - ctx.direction.sign() * mult * ctx.atr;
    StopResolution {
        price,
        stop_type: StopType::AtrMultiple,
        rationale: format!("{mult}x ATR ({}) from entry", fmt_price(ctx.atr)),
        artifact: Artifact::None,
    }
}
