//! Deterministic synthetic market data for demos, benches, and tests.
//!
//! Each symbol gets its own `StdRng` seeded from a BLAKE3 sub-seed of
//! `(seed, symbol)`, so a symbol's series depends only on the master seed and
//! its name, never on universe order or thread scheduling. Everything
//! produced here is tagged `Freshness::Synthetic`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sigscan_core::domain::{Bar, Ticker};

use crate::snapshot::{Freshness, InstrumentData, MarketSnapshot};
use crate::universe::Universe;

/// Bars per synthetic day at the 4h timeframe.
const BARS_PER_DAY: usize = 6;

/// Derive a per-symbol seed from the master seed.
pub fn sub_seed(seed: u64, symbol: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(symbol.as_bytes());
    let hash = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200, 0)
        .single()
        .unwrap_or_default()
}

/// 4h random-walk bars with occasional impulse candles.
///
/// Impulses are what leave fair-value gaps and order blocks behind, so a
/// synthetic universe exercises every rule of the resolver chains.
pub fn synthetic_bars(symbol: &str, bars: usize, seed: u64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(sub_seed(seed, symbol));
    let mut price = 10f64.powf(rng.gen_range(-1.0..4.5));
    let drift: f64 = rng.gen_range(-0.002..0.002);
    let start = epoch();

    (0..bars)
        .map(|i| {
            let mut ret = drift + rng.gen_range(-0.012..0.012);
            if rng.gen_bool(0.04) {
                ret *= 6.0;
            }
            let open = price;
            let close = price * (1.0 + ret);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.006));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.006));
            price = close;
            Bar {
                time: start + Duration::hours(4 * i as i64),
                open,
                high,
                low,
                close,
                volume: rng.gen_range(1_000.0..50_000.0),
            }
        })
        .collect()
}

/// 24h ticker derived from the tail of a bar series.
pub fn ticker_from_bars(bars: &[Bar]) -> Option<Ticker> {
    let last = bars.last()?;
    let day = &bars[bars.len().saturating_sub(BARS_PER_DAY)..];
    let open = day.first().map_or(last.open, |b| b.open);
    let base_volume: f64 = day.iter().map(|b| b.volume).sum();
    Some(Ticker {
        last: last.close,
        high_24h: day.iter().map(|b| b.high).fold(f64::MIN, f64::max),
        low_24h: day.iter().map(|b| b.low).fold(f64::MAX, f64::min),
        change_percent: (last.close / open - 1.0) * 100.0,
        base_volume,
        quote_volume: base_volume * last.close,
    })
}

/// Synthetic snapshot covering every symbol of `universe`.
pub fn synthetic_snapshot(universe: &Universe, bars: usize, seed: u64) -> MarketSnapshot {
    universe
        .iter()
        .map(|symbol| {
            let series = synthetic_bars(symbol, bars, seed);
            let ticker = ticker_from_bars(&series);
            (
                symbol.to_string(),
                InstrumentData {
                    bars: series,
                    ticker,
                    freshness: Freshness::synthetic(),
                },
            )
        })
        .collect()
}
