//! Property tests for structure and composition invariants.
//!
//! Uses proptest to verify:
//! 1. Gap geometry: every detected gap has top > bottom and mid halfway
//! 2. Mirror symmetry: reflecting prices swaps swing highs with swing lows
//! 3. Level ordering: stop, entry, and targets sit on the correct sides
//! 4. Scoring bounds: score in 0..=100, fallback entries never rate above C

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use sigscan_core::config::StructureParams;
use sigscan_core::domain::{
    Bar, Classification, Direction, Rating, SignalId, StructureKind, Ticker,
};
use sigscan_core::structure::{analyze, fair_value_gaps, swing_points};
use sigscan_core::{ComposeRequest, EngineConfig, SignalComposer};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random walk from 100 with per-bar return, wick size, and volume.
fn arb_bars(min: usize, max: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec((-0.04..0.04_f64, 0.0005..0.03_f64, 0.0..1.0_f64), min..max).prop_map(
        |steps| {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut price = 100.0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (ret, wick, skew))| {
                    let open = price;
                    let close = price * (1.0 + ret);
                    price = close;
                    Bar {
                        time: start + Duration::hours(4 * i as i64),
                        open,
                        high: open.max(close) * (1.0 + wick * skew),
                        low: open.min(close) * (1.0 - wick * (1.0 - skew)),
                        close,
                        volume: 1000.0,
                    }
                })
                .collect()
        },
    )
}

/// Negate prices so highs become lows and vice versa. Negation is exact, so
/// every strict comparison flips cleanly.
fn mirror(bars: &[Bar]) -> Vec<Bar> {
    bars.iter()
        .map(|b| Bar {
            time: b.time,
            open: -b.open,
            high: -b.low,
            low: -b.high,
            close: -b.close,
            volume: b.volume,
        })
        .collect()
}

fn compose(bars: &[Bar], last: f64) -> sigscan_core::domain::Signal {
    let config = EngineConfig::default();
    let ticker = Ticker::from_last(last);
    SignalComposer::new(&config)
        .compose(ComposeRequest {
            id: SignalId(0),
            symbol: "TEST",
            bars,
            ticker: &ticker,
            generated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        })
        .unwrap()
}

// ── 1. Gap Geometry ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn gaps_have_positive_height(bars in arb_bars(3, 200)) {
        for gap in fair_value_gaps(&bars) {
            prop_assert!(gap.top > gap.bottom);
            prop_assert!((gap.mid - (gap.top + gap.bottom) / 2.0).abs() < 1e-9);
            prop_assert!(gap.discovery_index >= 2 && gap.discovery_index < bars.len());
            prop_assert_eq!(gap.timestamp, bars[gap.discovery_index - 1].time);
        }
    }

    /// Each triple yields at most one gap, in discovery order.
    #[test]
    fn gaps_are_discovered_in_order(bars in arb_bars(3, 200)) {
        let gaps = fair_value_gaps(&bars);
        prop_assert!(gaps.windows(2).all(|w| w[0].discovery_index < w[1].discovery_index));
    }
}

// ── 2. Mirror Symmetry ───────────────────────────────────────────────

proptest! {
    #[test]
    fn mirroring_swaps_swing_kinds(bars in arb_bars(11, 150), lookback in 1usize..6) {
        let original = swing_points(&bars, lookback);
        let mirrored = swing_points(&mirror(&bars), lookback);

        let idx = |v: &[sigscan_core::domain::SwingPoint]| {
            v.iter().map(|s| s.index).collect::<Vec<_>>()
        };
        prop_assert_eq!(idx(&original.highs), idx(&mirrored.lows));
        prop_assert_eq!(idx(&original.lows), idx(&mirrored.highs));
    }

    #[test]
    fn mirroring_swaps_gap_kinds(bars in arb_bars(3, 150)) {
        let original = analyze(&bars, &StructureParams::default());
        let mirrored = analyze(&mirror(&bars), &StructureParams::default());

        prop_assert_eq!(original.fair_value_gaps.len(), mirrored.fair_value_gaps.len());
        for (a, b) in original.fair_value_gaps.iter().zip(&mirrored.fair_value_gaps) {
            prop_assert_eq!(a.kind.opposite(), b.kind);
            prop_assert_eq!(a.discovery_index, b.discovery_index);
        }
        prop_assert_eq!(original.order_blocks.len(), mirrored.order_blocks.len());
    }
}

// ── 3. Level Ordering ────────────────────────────────────────────────

proptest! {
    #[test]
    fn levels_sit_on_the_correct_side(bars in arb_bars(60, 160), drift in -0.05..0.05_f64) {
        let last = bars[bars.len() - 1].close * (1.0 + drift);
        let s = compose(&bars, last);

        match s.direction {
            Direction::Long => {
                prop_assert!(s.stop_price <= s.entry_price);
                prop_assert!(s.entry_price <= s.tp1 && s.tp1 <= s.tp2);
            }
            Direction::Short => {
                prop_assert!(s.stop_price >= s.entry_price);
                prop_assert!(s.entry_price >= s.tp1 && s.tp1 >= s.tp2);
            }
        }
        prop_assert!(s.reward_risk_ratio > 0.0);
    }

    /// A gap entry always lies within the gap it was taken from.
    #[test]
    fn gap_entry_lies_inside_gap(bars in arb_bars(60, 160)) {
        let s = compose(&bars, bars[bars.len() - 1].close);
        if s.entry_type == sigscan_core::domain::EntryType::FvgMid {
            let kind = s.direction.matching_kind();
            let gap = s
                .structure_snapshot
                .fair_value_gaps
                .iter()
                .rev()
                .find(|g| g.kind == kind);
            if let Some(gap) = gap {
                prop_assert!(s.entry_price >= gap.bottom && s.entry_price <= gap.top);
            }
        }
    }
}

// ── 4. Scoring Bounds ────────────────────────────────────────────────

proptest! {
    #[test]
    fn score_is_bounded_and_fallback_is_capped(bars in arb_bars(60, 160)) {
        let s = compose(&bars, bars[bars.len() - 1].close);
        prop_assert!(s.confidence_score <= 100);
        if s.entry_type.is_fallback() {
            prop_assert_eq!(s.rating, Rating::C);
            prop_assert_eq!(s.classification, Classification::Candidate);
        }
        if s.rating == Rating::C {
            prop_assert_eq!(s.classification, Classification::Candidate);
        }
    }

    #[test]
    fn gap_kinds_only_bullish_or_bearish(bars in arb_bars(3, 120)) {
        for gap in fair_value_gaps(&bars) {
            prop_assert!(matches!(gap.kind, StructureKind::Bullish | StructureKind::Bearish));
        }
    }
}
