//! Market-structure artifacts produced by the structure detector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional intent of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Structure kind that supports a trade in this direction.
    pub fn matching_kind(self) -> StructureKind {
        match self {
            Direction::Long => StructureKind::Bullish,
            Direction::Short => StructureKind::Bearish,
        }
    }

    /// +1.0 for long, -1.0 for short.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

/// Bullish or bearish polarity of a structure artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Bullish,
    Bearish,
}

impl StructureKind {
    pub fn opposite(self) -> Self {
        match self {
            StructureKind::Bullish => StructureKind::Bearish,
            StructureKind::Bearish => StructureKind::Bullish,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingKind {
    High,
    Low,
}

/// A local extreme confirmed against a symmetric lookback window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub index: usize,
    pub price: f64,
    pub time: DateTime<Utc>,
    pub kind: SwingKind,
}

/// Three-bar imbalance where the outer bars do not overlap.
///
/// Invariant: `top > bottom`, `mid == (top + bottom) / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairValueGap {
    pub kind: StructureKind,
    pub top: f64,
    pub bottom: f64,
    pub mid: f64,
    /// Time of the middle (gap) bar.
    pub timestamp: DateTime<Utc>,
    /// Index of the third bar, the one whose close completes the gap.
    pub discovery_index: usize,
}

impl FairValueGap {
    pub fn new(
        kind: StructureKind,
        top: f64,
        bottom: f64,
        timestamp: DateTime<Utc>,
        discovery_index: usize,
    ) -> Self {
        Self {
            kind,
            top,
            bottom,
            mid: (top + bottom) / 2.0,
            timestamp,
            discovery_index,
        }
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.bottom && price <= self.top
    }
}

/// The bar identified as the likely institutional footprint preceding a reversal.
///
/// `footprint_index` always points at the footprint bar itself, and the OHLC
/// fields are copied from that same bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBlock {
    pub kind: StructureKind,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
    pub timestamp: DateTime<Utc>,
    pub footprint_index: usize,
}

/// Close beyond a previously established swing extreme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureBreak {
    pub kind: StructureKind,
    pub level: f64,
    pub timestamp: DateTime<Utc>,
    pub confirmed: bool,
}
