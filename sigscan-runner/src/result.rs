//! Scan result: the ranked signals and filtered instruments of one scan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sigscan_core::domain::{ConfigHash, ScanId, Signal};
use std::fmt;

use crate::snapshot::DataHealth;

/// Complete, immutable result of one orchestration run.
///
/// Contains:
/// - Signals, ranked by confidence (ties in universe order)
/// - Instruments that produced no signal, with the reason
/// - Data-health tally for the universe
/// - Config hash for reproducibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub scan_id: ScanId,
    pub scan_time: DateTime<Utc>,
    pub total_signals: usize,
    pub signals: Vec<Signal>,
    pub filtered: Vec<FilteredInstrument>,
    pub data_health: DataHealth,
    pub config_hash: ConfigHash,
}

impl ScanResult {
    pub fn tradable(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter().filter(|s| s.is_tradable())
    }

    pub fn signal_for(&self, symbol: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.symbol == symbol)
    }

    pub fn filtered_for(&self, symbol: &str) -> Option<&FilterReason> {
        self.filtered
            .iter()
            .find(|f| f.symbol == symbol)
            .map(|f| &f.reason)
    }

    /// Number of instruments accounted for: signals plus filtered.
    pub fn outcomes(&self) -> usize {
        self.signals.len() + self.filtered.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredInstrument {
    pub symbol: String,
    pub reason: FilterReason,
}

/// Why an instrument produced no signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterReason {
    /// Fewer bars than the configured minimum (absent symbols have zero).
    InsufficientData { bars: usize, required: usize },
    /// Enough bars but no ticker to price against.
    NoTickerData,
    /// The composer rejected the inputs.
    GenerationError { detail: String },
}

impl FilterReason {
    pub fn code(&self) -> &'static str {
        match self {
            FilterReason::InsufficientData { .. } => "INSUFFICIENT_DATA",
            FilterReason::NoTickerData => "NO_TICKER_DATA",
            FilterReason::GenerationError { .. } => "GENERATION_ERROR",
        }
    }
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterReason::GenerationError { detail } => write!(f, "{}({detail})", self.code()),
            _ => f.write_str(self.code()),
        }
    }
}
