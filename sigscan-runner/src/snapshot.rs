//! Materialized market data handed to the scanner, plus its health summary.
//!
//! The scanner never fetches anything. Whoever owns the market-data layer
//! builds a `MarketSnapshot` (bars, ticker, freshness per symbol) and the
//! scanner reads it.

use serde::{Deserialize, Serialize};
use sigscan_core::domain::{Bar, Ticker};
use std::collections::HashMap;

use crate::universe::Universe;

/// How the data for one instrument was obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessState {
    /// Fetched for this scan.
    Live,
    /// Served from a cache within its validity window.
    #[default]
    Cached,
    /// Served from a cache past its validity window.
    Stale,
    /// Generated, not market data.
    Synthetic,
}

/// Freshness metadata attached by the data source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Freshness {
    pub state: FreshnessState,
    /// Seconds since the data was fetched, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_secs: Option<u64>,
}

impl Freshness {
    pub fn live() -> Self {
        Self {
            state: FreshnessState::Live,
            age_secs: Some(0),
        }
    }

    pub fn cached(age_secs: u64) -> Self {
        Self {
            state: FreshnessState::Cached,
            age_secs: Some(age_secs),
        }
    }

    pub fn stale(age_secs: u64) -> Self {
        Self {
            state: FreshnessState::Stale,
            age_secs: Some(age_secs),
        }
    }

    pub fn synthetic() -> Self {
        Self {
            state: FreshnessState::Synthetic,
            age_secs: None,
        }
    }
}

/// Everything known about one instrument at scan time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentData {
    pub bars: Vec<Bar>,
    pub ticker: Option<Ticker>,
    #[serde(default)]
    pub freshness: Freshness,
}

/// Per-symbol market data for one scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    instruments: HashMap<String, InstrumentData>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, data: InstrumentData) {
        self.instruments.insert(symbol.into(), data);
    }

    pub fn get(&self, symbol: &str) -> Option<&InstrumentData> {
        self.instruments.get(symbol)
    }

    /// Bars for `symbol`; a symbol with no entry has zero bars.
    pub fn bars(&self, symbol: &str) -> &[Bar] {
        self.instruments
            .get(symbol)
            .map(|d| d.bars.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl FromIterator<(String, InstrumentData)> for MarketSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, InstrumentData)>>(iter: T) -> Self {
        Self {
            instruments: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unavailable,
}

/// Freshness tally over the universe for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataHealth {
    pub instruments: usize,
    pub live: usize,
    pub cached: usize,
    pub stale: usize,
    pub synthetic: usize,
    /// Universe symbols with no entry or no bars in the snapshot.
    pub missing: usize,
    pub status: HealthStatus,
}

impl DataHealth {
    /// Count every universe symbol once.
    ///
    /// `Unavailable` when no symbol has bars, `Degraded` when any is stale or
    /// missing, otherwise `Healthy`.
    pub fn assess(universe: &Universe, snapshot: &MarketSnapshot) -> Self {
        let mut health = Self {
            instruments: universe.len(),
            live: 0,
            cached: 0,
            stale: 0,
            synthetic: 0,
            missing: 0,
            status: HealthStatus::Healthy,
        };

        for symbol in universe.iter() {
            match snapshot.get(symbol) {
                Some(data) if !data.bars.is_empty() => match data.freshness.state {
                    FreshnessState::Live => health.live += 1,
                    FreshnessState::Cached => health.cached += 1,
                    FreshnessState::Stale => health.stale += 1,
                    FreshnessState::Synthetic => health.synthetic += 1,
                },
                _ => health.missing += 1,
            }
        }

        health.status = if health.missing == health.instruments {
            HealthStatus::Unavailable
        } else if health.stale > 0 || health.missing > 0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };
        health
    }

    pub fn with_data(&self) -> usize {
        self.instruments - self.missing
    }
}
