//! Signal record - one per scanned instrument per scan.
//!
//! Signals are immutable once emitted. A later scan produces an entirely new
//! set of records that supersedes the previous set wholesale; nothing in the
//! engine updates a signal in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SignalId;
use super::structure::{Direction, FairValueGap, OrderBlock, StructureBreak, SwingPoint};

/// Which rule of the entry chain produced the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Midline of the most recent direction-matching fair-value gap.
    FvgMid,
    /// Outer edge of the most recent direction-matching order block.
    OrderBlock,
    /// Most recent direction-matching swing point.
    SwingPoint,
    /// Current market price with no structural support.
    Market,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::FvgMid => "FVG_MID",
            EntryType::OrderBlock => "ORDER_BLOCK",
            EntryType::SwingPoint => "SWING_POINT",
            EntryType::Market => "MARKET",
        }
    }

    /// The unsupported fallback entry.
    pub fn is_fallback(self) -> bool {
        matches!(self, EntryType::Market)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule of the stop chain produced the stop price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopType {
    FvgBoundary,
    OrderBlock,
    SwingPoint,
    AtrMultiple,
}

impl StopType {
    pub fn as_str(self) -> &'static str {
        match self {
            StopType::FvgBoundary => "FVG_BOUNDARY",
            StopType::OrderBlock => "ORDER_BLOCK",
            StopType::SwingPoint => "SWING_POINT",
            StopType::AtrMultiple => "ATR_MULTIPLE",
        }
    }
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade derived from the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    S,
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Tradable,
    Candidate,
}

/// Whether the entry level can be acted on at the current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStatus {
    /// Current price is at or near the entry level.
    Active,
    /// Entry is a level price has yet to come back to.
    AwaitingRetest,
}

/// Trimmed view of the structures detected for the scanned window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureSnapshot {
    pub fair_value_gaps: Vec<FairValueGap>,
    pub order_blocks: Vec<OrderBlock>,
    pub swing_highs: Vec<SwingPoint>,
    pub swing_lows: Vec<SwingPoint>,
    pub structure_breaks: Vec<StructureBreak>,
}

/// A ranked directional trading signal for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: SignalId,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub entry_type: EntryType,
    pub entry_rationale: String,
    pub current_price: f64,
    pub stop_price: f64,
    pub stop_type: StopType,
    pub stop_rationale: String,
    pub tp1: f64,
    pub tp2: f64,
    pub reward_risk_ratio: f64,
    pub rating: Rating,
    /// Integer confidence in `0..=100`.
    pub confidence_score: u8,
    pub classification: Classification,
    pub status: SignalStatus,
    pub timeframe: String,
    pub structure_snapshot: StructureSnapshot,
    pub atr: f64,
    pub generated_at: DateTime<Utc>,
}

impl Signal {
    pub fn is_tradable(&self) -> bool {
        self.classification == Classification::Tradable
    }

    /// Absolute distance between entry and stop.
    pub fn risk(&self) -> f64 {
        (self.entry_price - self.stop_price).abs()
    }
}
