//! Universe configuration: the fixed, ordered list of instruments to scan.
//!
//! Stored as TOML (`symbols = ["BTCUSDT", ...]`). Order matters: it is the
//! tie-break order of the ranked scan output and the order signal ids are
//! assigned in.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read universe file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse universe TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("universe has no symbols")]
    Empty,

    #[error("symbol '{0}' is listed more than once")]
    Duplicate(String),

    #[error("blank symbol at position {0}")]
    Blank(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    pub symbols: Vec<String>,
}

impl Universe {
    /// Build a validated universe from any list of symbols.
    pub fn new<I, S>(symbols: I) -> Result<Self, UniverseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let universe = Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
        };
        universe.validate()?;
        Ok(universe)
    }

    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, UniverseError> {
        let universe: Self = toml::from_str(content)?;
        universe.validate()?;
        Ok(universe)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Every symbol must be non-blank and appear once, so each scan yields
    /// exactly one outcome per instrument.
    pub fn validate(&self) -> Result<(), UniverseError> {
        if self.symbols.is_empty() {
            return Err(UniverseError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.symbols.len());
        for (i, symbol) in self.symbols.iter().enumerate() {
            if symbol.trim().is_empty() {
                return Err(UniverseError::Blank(i));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(UniverseError::Duplicate(symbol.clone()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// Default crypto universe: large-cap USDT perpetual pairs.
    pub fn default_crypto() -> Self {
        Self {
            symbols: [
                "BTCUSDT", "ETHUSDT", "SOLUSDT", "BNBUSDT", "XRPUSDT", "ADAUSDT", "DOGEUSDT",
                "AVAXUSDT", "LINKUSDT", "DOTUSDT", "MATICUSDT", "LTCUSDT", "ATOMUSDT",
                "NEARUSDT", "APTUSDT", "ARBUSDT", "OPUSDT", "INJUSDT", "SUIUSDT", "TONUSDT",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}
