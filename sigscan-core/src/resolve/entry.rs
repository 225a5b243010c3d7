//! Entry price resolution.
//!
//! Priority: fair-value gap midline → order block edge → swing point →
//! current market price. Only the market rule sets `fallback`, and a fallback
//! entry forces the final signal down to rating C.

use serde::{Deserialize, Serialize};

use super::{
    fmt_price, select_always, select_gap, select_order_block, select_swing, Artifact,
    ResolveContext,
};
use crate::domain::{Direction, EntryType};

/// Resolved entry price plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryResolution {
    pub price: f64,
    pub entry_type: EntryType,
    pub rationale: String,
    pub artifact: Artifact,
    /// Current price is at or near the entry, so the level is reachable now.
    pub tradable: bool,
    /// No structure supported the entry; it is simply the market price.
    pub fallback: bool,
}

/// One entry rule: `select` decides applicability and picks the artifact,
/// `resolve` turns it into a price.
pub struct EntryRule {
    pub name: &'static str,
    pub entry_type: EntryType,
    pub select: fn(&ResolveContext<'_>) -> Option<Artifact>,
    pub resolve: fn(&ResolveContext<'_>, Artifact) -> Option<EntryResolution>,
}

/// Entry rules in priority order.
pub const ENTRY_RULES: &[EntryRule] = &[
    EntryRule {
        name: "fair_value_gap",
        entry_type: EntryType::FvgMid,
        select: select_gap,
        resolve: gap_entry,
    },
    EntryRule {
        name: "order_block",
        entry_type: EntryType::OrderBlock,
        select: select_order_block,
        resolve: order_block_entry,
    },
    EntryRule {
        name: "swing_point",
        entry_type: EntryType::SwingPoint,
        select: select_swing,
        resolve: swing_entry,
    },
    EntryRule {
        name: "market",
        entry_type: EntryType::Market,
        select: select_always,
        resolve: market_entry,
    },
];

/// Walk [`ENTRY_RULES`] and return the first rule's resolution.
pub fn resolve_entry(ctx: &ResolveContext<'_>) -> EntryResolution {
    ENTRY_RULES
        .iter()
        .find_map(|rule| (rule.select)(ctx).and_then(|artifact| (rule.resolve)(ctx, artifact)))
        .unwrap_or_else(|| fallback(ctx))
}

fn near_price(ctx: &ResolveContext<'_>, entry: f64) -> bool {
    entry != 0.0 && ((ctx.current_price - entry) / entry).abs() <= ctx.config.entry.proximity_pct
}

fn gap_entry(ctx: &ResolveContext<'_>, artifact: Artifact) -> Option<EntryResolution> {
    let Artifact::FairValueGap(gap) = artifact else {
        return None;
    };
    // Retest comes from the side price left: the top of a bullish gap, the
    // bottom of a bearish one. Step inward by the configured ratio.
    let (near, inward) = match ctx.direction {
        Direction::Long => (gap.top, -1.0),
        Direction::Short => (gap.bottom, 1.0),
    };
    let price = near + inward * ctx.config.entry.fvg_entry_ratio * gap.height();
    let in_zone = gap.contains(ctx.current_price);
    let tradable = in_zone || near_price(ctx, price);

    let rationale = format!(
        "{} FVG {}-{} (bar {}), entry at {:.0}% retrace {}; price {}",
        match ctx.direction {
            Direction::Long => "bullish",
            Direction::Short => "bearish",
        },
        fmt_price(gap.bottom),
        fmt_price(gap.top),
        gap.discovery_index,
        ctx.config.entry.fvg_entry_ratio * 100.0,
        fmt_price(price),
        if in_zone {
            "inside gap"
        } else if tradable {
            "near entry"
        } else {
            "awaiting retest"
        },
    );

    Some(EntryResolution {
        price,
        entry_type: EntryType::FvgMid,
        rationale,
        artifact: Artifact::FairValueGap(gap),
        tradable,
        fallback: false,
    })
}

fn order_block_entry(ctx: &ResolveContext<'_>, artifact: Artifact) -> Option<EntryResolution> {
    let Artifact::OrderBlock(block) = artifact else {
        return None;
    };
    let offset = ctx.config.entry.order_block_offset_pct;
    // Enter just outside the block on the side price approaches from.
    let (edge, price) = match ctx.direction {
        Direction::Long => (block.high, block.high * (1.0 + offset)),
        Direction::Short => (block.low, block.low * (1.0 - offset)),
    };
    let tradable = near_price(ctx, price);
    let rationale = format!(
        "{} order block at bar {} ({}-{}), entry {} off edge {}",
        match ctx.direction {
            Direction::Long => "bullish",
            Direction::Short => "bearish",
        },
        block.footprint_index,
        fmt_price(block.low),
        fmt_price(block.high),
        fmt_price(price),
        fmt_price(edge),
    );

    Some(EntryResolution {
        price,
        entry_type: EntryType::OrderBlock,
        rationale,
        artifact: Artifact::OrderBlock(block),
        tradable,
        fallback: false,
    })
}

fn swing_entry(ctx: &ResolveContext<'_>, artifact: Artifact) -> Option<EntryResolution> {
    let Artifact::SwingPoint(swing) = artifact else {
        return None;
    };
    let offset = ctx.config.entry.swing_offset_pct;
    // Just above a swing low for longs, just below a swing high for shorts.
    let price = swing.price * (1.0 + ctx.direction.sign() * offset);
    let tradable = near_price(ctx, price);
    let rationale = format!(
        "swing {} {} at bar {}, pullback entry {}",
        match ctx.direction {
            Direction::Long => "low",
            Direction::Short => "high",
        },
        fmt_price(swing.price),
        swing.index,
        fmt_price(price),
    );

    Some(EntryResolution {
        price,
        entry_type: EntryType::SwingPoint,
        rationale,
        artifact: Artifact::SwingPoint(swing),
        tradable,
        fallback: false,
    })
}

fn market_entry(ctx: &ResolveContext<'_>, _: Artifact) -> Option<EntryResolution> {
    Some(fallback(ctx))
}

fn fallback(ctx: &ResolveContext<'_>) -> EntryResolution {
    EntryResolution {
        price: ctx.current_price,
        entry_type: EntryType::Market,
        rationale: format!(
            "no supporting structure, market entry at {}",
            fmt_price(ctx.current_price)
        ),
        artifact: Artifact::None,
        tradable: true,
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::domain::SwingKind;
    use crate::indicators::assert_approx;
    use crate::resolve::fixtures::*;
    use crate::structure::MarketStructure;

    #[test]
    fn rule_order_is_gap_block_swing_market() {
        let types: Vec<_> = ENTRY_RULES.iter().map(|r| r.entry_type).collect();
        assert_eq!(
            types,
            vec![
                EntryType::FvgMid,
                EntryType::OrderBlock,
                EntryType::SwingPoint,
                EntryType::Market
            ]
        );
    }

    #[test]
    fn long_gap_entry_is_midline_and_tradable_inside_zone() {
        let config = EngineConfig::default();
        let ms = MarketStructure {
            fair_value_gaps: vec![bullish_gap()],
            ..Default::default()
        };
        let entry = resolve_entry(&ctx(Direction::Long, &ms, 101.5, 1.0, &config));
        assert_eq!(entry.entry_type, EntryType::FvgMid);
        assert_approx(entry.price, 101.0, 1e-12);
        assert!(entry.tradable);
        assert!(!entry.fallback);
        assert_eq!(entry.artifact, Artifact::FairValueGap(bullish_gap()));
    }

    #[test]
    fn gap_entry_far_from_price_is_not_tradable() {
        let config = EngineConfig::default();
        let ms = MarketStructure {
            fair_value_gaps: vec![bullish_gap()],
            ..Default::default()
        };
        // 110 is ~8.9% above the 101 midline.
        let entry = resolve_entry(&ctx(Direction::Long, &ms, 110.0, 1.0, &config));
        assert_eq!(entry.entry_type, EntryType::FvgMid);
        assert!(!entry.tradable);
        // 102.4 is outside the zone but within 1.5% of 101.
        let entry = resolve_entry(&ctx(Direction::Long, &ms, 102.4, 1.0, &config));
        assert!(entry.tradable);
    }

    #[test]
    fn short_gap_entry_is_midline() {
        let config = EngineConfig::default();
        let ms = MarketStructure {
            fair_value_gaps: vec![bearish_gap()],
            ..Default::default()
        };
        let entry = resolve_entry(&ctx(Direction::Short, &ms, 105.0, 1.0, &config));
        assert_eq!(entry.entry_type, EntryType::FvgMid);
        assert_approx(entry.price, 109.0, 1e-12);
    }

    #[test]
    fn gap_wins_over_order_block() {
        let config = EngineConfig::default();
        let ms = MarketStructure {
            fair_value_gaps: vec![bullish_gap()],
            order_blocks: vec![bullish_block()],
            swing_lows: vec![swing(SwingKind::Low, 95.0, 20)],
            ..Default::default()
        };
        let entry = resolve_entry(&ctx(Direction::Long, &ms, 101.0, 1.0, &config));
        assert_eq!(entry.entry_type, EntryType::FvgMid);
    }

    #[test]
    fn opposite_gap_is_ignored() {
        let config = EngineConfig::default();
        let ms = MarketStructure {
            fair_value_gaps: vec![bearish_gap()],
            order_blocks: vec![bullish_block()],
            ..Default::default()
        };
        let entry = resolve_entry(&ctx(Direction::Long, &ms, 98.1, 1.0, &config));
        assert_eq!(entry.entry_type, EntryType::OrderBlock);
        assert_approx(entry.price, 98.0 * 1.002, 1e-12);
        assert!(entry.tradable);
    }

    #[test]
    fn short_order_block_entry_sits_below_block() {
        let config = EngineConfig::default();
        let ms = MarketStructure {
            order_blocks: vec![bearish_block()],
            ..Default::default()
        };
        let entry = resolve_entry(&ctx(Direction::Short, &ms, 100.0, 1.0, &config));
        assert_eq!(entry.entry_type, EntryType::OrderBlock);
        assert_approx(entry.price, 110.0 * 0.998, 1e-12);
        assert!(!entry.tradable);
    }

    #[test]
    fn swing_entry_offsets_toward_pullback() {
        let config = EngineConfig::default();
        let ms = MarketStructure {
            swing_highs: vec![swing(SwingKind::High, 120.0, 10)],
            swing_lows: vec![swing(SwingKind::Low, 90.0, 5), swing(SwingKind::Low, 95.0, 15)],
            ..Default::default()
        };
        let long = resolve_entry(&ctx(Direction::Long, &ms, 96.0, 1.0, &config));
        assert_eq!(long.entry_type, EntryType::SwingPoint);
        assert_approx(long.price, 95.0 * 1.002, 1e-12);

        let short = resolve_entry(&ctx(Direction::Short, &ms, 96.0, 1.0, &config));
        assert_eq!(short.entry_type, EntryType::SwingPoint);
        assert_approx(short.price, 120.0 * 0.998, 1e-12);
    }

    #[test]
    fn no_structure_falls_back_to_market() {
        let config = EngineConfig::default();
        let ms = MarketStructure::default();
        let entry = resolve_entry(&ctx(Direction::Short, &ms, 42.0, 1.0, &config));
        assert_eq!(entry.entry_type, EntryType::Market);
        assert_eq!(entry.price, 42.0);
        assert!(entry.fallback);
        assert_eq!(entry.artifact, Artifact::None);
    }

    #[test]
    fn entry_ratio_is_configurable() {
        let mut config = EngineConfig::default();
        config.entry.fvg_entry_ratio = 0.25;
        let ms = MarketStructure {
            fair_value_gaps: vec![bullish_gap()],
            ..Default::default()
        };
        let entry = resolve_entry(&ctx(Direction::Long, &ms, 101.0, 1.0, &config));
        assert_approx(entry.price, 101.5, 1e-12);
    }
}
