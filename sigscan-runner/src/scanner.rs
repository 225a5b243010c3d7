//! Scan orchestration across the universe.
//!
//! Each instrument is evaluated independently and in parallel (rayon). The
//! collected outcomes keep universe order; signal ids are then assigned in
//! that order, and the ranking sort runs last, so the output never depends
//! on which worker finished first.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use sigscan_core::domain::{ConfigHash, ScanId, Signal, SignalId};
use sigscan_core::{ComposeRequest, ConfigError, EngineConfig, SignalComposer};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::result::{FilterReason, FilteredInstrument, ScanResult};
use crate::snapshot::{DataHealth, MarketSnapshot};
use crate::universe::Universe;

/// Outcome of evaluating one instrument.
#[derive(Debug)]
enum Outcome {
    Signal(Signal),
    Filtered(FilterReason),
}

/// Owns the engine config and the id counters for successive scans.
///
/// Counters are monotonic for the scanner's lifetime: signal ids never
/// repeat across scans. Running two scans at once is the caller's concern.
#[derive(Debug)]
pub struct Scanner {
    config: EngineConfig,
    config_hash: ConfigHash,
    next_signal: AtomicU64,
    next_scan: AtomicU64,
}

impl Scanner {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let config_hash = config.config_hash()?;
        Ok(Self {
            config,
            config_hash,
            next_signal: AtomicU64::new(1),
            next_scan: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_hash(&self) -> &ConfigHash {
        &self.config_hash
    }

    /// Scan stamped with the current wall-clock time.
    pub fn scan(&self, universe: &Universe, snapshot: &MarketSnapshot) -> ScanResult {
        self.scan_at(universe, snapshot, Utc::now())
    }

    /// Scan with an explicit timestamp, used for `scan_time` and every
    /// signal's `generated_at`.
    pub fn scan_at(
        &self,
        universe: &Universe,
        snapshot: &MarketSnapshot,
        scan_time: DateTime<Utc>,
    ) -> ScanResult {
        let scan_id = ScanId(self.next_scan.fetch_add(1, Ordering::Relaxed));
        info!(
            %scan_id,
            instruments = universe.len(),
            config = self.config_hash.short(),
            "scan started"
        );

        let composer = SignalComposer::new(&self.config);
        let outcomes: Vec<(&str, Outcome)> = universe
            .symbols
            .par_iter()
            .map(|symbol| {
                let outcome = self.evaluate(&composer, symbol, snapshot, scan_time);
                (symbol.as_str(), outcome)
            })
            .collect();

        let mut signals = Vec::new();
        let mut filtered = Vec::new();
        for (symbol, outcome) in outcomes {
            match outcome {
                Outcome::Signal(signal) => {
                    let id = SignalId(self.next_signal.fetch_add(1, Ordering::Relaxed));
                    signals.push(Signal { id, ..signal });
                }
                Outcome::Filtered(reason) => filtered.push(FilteredInstrument {
                    symbol: symbol.to_string(),
                    reason,
                }),
            }
        }

        // Stable: equal scores keep universe order.
        signals.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));

        let data_health = DataHealth::assess(universe, snapshot);
        info!(
            %scan_id,
            signals = signals.len(),
            tradable = signals.iter().filter(|s| s.is_tradable()).count(),
            filtered = filtered.len(),
            health = ?data_health.status,
            "scan complete"
        );

        ScanResult {
            scan_id,
            scan_time,
            total_signals: signals.len(),
            signals,
            filtered,
            data_health,
            config_hash: self.config_hash.clone(),
        }
    }

    fn evaluate(
        &self,
        composer: &SignalComposer<'_>,
        symbol: &str,
        snapshot: &MarketSnapshot,
        scan_time: DateTime<Utc>,
    ) -> Outcome {
        let required = self.config.scan.min_bars;
        let bars = snapshot.bars(symbol);
        if bars.len() < required {
            debug!(symbol, bars = bars.len(), required, "insufficient data");
            return Outcome::Filtered(FilterReason::InsufficientData {
                bars: bars.len(),
                required,
            });
        }

        let Some(ticker) = snapshot.get(symbol).and_then(|d| d.ticker.as_ref()) else {
            debug!(symbol, "no ticker data");
            return Outcome::Filtered(FilterReason::NoTickerData);
        };

        let request = ComposeRequest {
            // Real id assigned after collection.
            id: SignalId(0),
            symbol,
            bars,
            ticker,
            generated_at: scan_time,
        };
        match composer.compose(request) {
            Ok(signal) => Outcome::Signal(signal),
            Err(e) => {
                warn!(symbol, error = %e, "signal generation failed");
                Outcome::Filtered(FilterReason::GenerationError {
                    detail: e.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Freshness, InstrumentData};
    use chrono::{Duration, TimeZone};
    use sigscan_core::domain::{Bar, Ticker};

    fn t(i: usize) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::hours(4 * i as i64)
    }

    fn trend_bars(n: usize, step: f64) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let open = 100.0 + step * i as f64;
                let close = open + step;
                Bar {
                    time: t(i),
                    open,
                    high: open.max(close) + 1.0,
                    low: open.min(close) - 1.0,
                    close,
                    volume: 1000.0,
                }
            })
            .collect()
    }

    fn instrument(n: usize, ticker: Option<f64>) -> InstrumentData {
        InstrumentData {
            bars: trend_bars(n, 0.5),
            ticker: ticker.map(Ticker::from_last),
            freshness: Freshness::live(),
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.scan.min_bars = 0;
        assert!(Scanner::new(config).is_err());
    }

    #[test]
    fn filter_precedence_bars_then_ticker() {
        let scanner = Scanner::new(EngineConfig::default()).unwrap();
        let universe = Universe::new(["SHORT", "NOTICK", "OK"]).unwrap();
        let mut snapshot = MarketSnapshot::new();
        // Too few bars and no ticker: bar check wins.
        snapshot.insert("SHORT", instrument(49, None));
        snapshot.insert("NOTICK", instrument(50, None));
        snapshot.insert("OK", instrument(50, Some(125.0)));

        let result = scanner.scan_at(&universe, &snapshot, t(60));

        assert_eq!(
            result.filtered_for("SHORT"),
            Some(&FilterReason::InsufficientData {
                bars: 49,
                required: 50
            })
        );
        assert_eq!(result.filtered_for("NOTICK"), Some(&FilterReason::NoTickerData));
        assert!(result.signal_for("OK").is_some());
        assert_eq!(result.total_signals, 1);
    }

    #[test]
    fn ids_are_monotonic_across_scans() {
        let scanner = Scanner::new(EngineConfig::default()).unwrap();
        let universe = Universe::new(["A", "B"]).unwrap();
        let snapshot: MarketSnapshot = universe
            .iter()
            .map(|s| (s.to_string(), instrument(60, Some(130.0))))
            .collect();

        let first = scanner.scan_at(&universe, &snapshot, t(60));
        let second = scanner.scan_at(&universe, &snapshot, t(61));

        assert_eq!(first.scan_id, ScanId(1));
        assert_eq!(second.scan_id, ScanId(2));
        let ids = |r: &ScanResult| {
            let mut v: Vec<u64> = r.signals.iter().map(|s| s.id.0).collect();
            v.sort_unstable();
            v
        };
        assert_eq!(ids(&first), vec![1, 2]);
        assert_eq!(ids(&second), vec![3, 4]);
    }

    #[test]
    fn every_signal_is_stamped_with_scan_time() {
        let scanner = Scanner::new(EngineConfig::default()).unwrap();
        let universe = Universe::new(["A"]).unwrap();
        let mut snapshot = MarketSnapshot::new();
        snapshot.insert("A", instrument(60, Some(130.0)));

        let result = scanner.scan_at(&universe, &snapshot, t(99));

        assert_eq!(result.scan_time, t(99));
        assert_eq!(result.signals[0].generated_at, t(99));
        assert_eq!(&result.config_hash, scanner.config_hash());
    }
}
