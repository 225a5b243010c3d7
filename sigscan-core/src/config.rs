//! Engine configuration.
//!
//! Every tunable constant the engine uses (indicator periods, offset ratios,
//! stop buffers, target multiples, rating thresholds) lives here. The config
//! is built once, validated, and then passed by reference into the engine;
//! nothing inside the engine mutates it.
//!
//! Every section is `#[serde(default)]`, so a TOML file only needs the keys it
//! overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::domain::ConfigHash;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid config: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Upper bound for every bar-count window (periods, lookback, min_bars).
pub const MAX_WINDOW: usize = 10_000;

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Complete, immutable engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorParams,
    pub structure: StructureParams,
    pub entry: EntryParams,
    pub stop: StopParams,
    pub targets: TargetParams,
    pub scoring: ScoringParams,
    pub scan: ScanParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub atr_period: usize,
    pub rsi_period: usize,
    pub sma_fast: usize,
    pub sma_slow: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            atr_period: 14,
            rsi_period: 14,
            sma_fast: 20,
            sma_slow: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureParams {
    /// Bars on each side a swing extreme must strictly exceed.
    pub swing_lookback: usize,
    /// How many of each artifact kind the signal snapshot keeps.
    pub snapshot_len: usize,
    /// How many of the most recent gaps vote on structure confirmation.
    pub confirmation_window: usize,
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            swing_lookback: 5,
            snapshot_len: 3,
            confirmation_window: 3,
        }
    }
}

/// Entry chain parameters. Percentages are fractions (0.002 == 0.2%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryParams {
    /// Fraction of gap height the entry sits inside the near boundary.
    pub fvg_entry_ratio: f64,
    /// Current price within this fraction of a structural entry counts as reachable.
    pub proximity_pct: f64,
    pub order_block_offset_pct: f64,
    pub swing_offset_pct: f64,
}

impl Default for EntryParams {
    fn default() -> Self {
        Self {
            fvg_entry_ratio: 0.5,
            proximity_pct: 0.015,
            order_block_offset_pct: 0.002,
            swing_offset_pct: 0.002,
        }
    }
}

/// Stop chain parameters. Buffers always widen the stop away from entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopParams {
    pub fvg_buffer_pct: f64,
    pub order_block_buffer_pct: f64,
    pub swing_buffer_pct: f64,
    pub atr_multiplier: f64,
}

impl Default for StopParams {
    fn default() -> Self {
        Self {
            fvg_buffer_pct: 0.002,
            order_block_buffer_pct: 0.002,
            swing_buffer_pct: 0.005,
            atr_multiplier: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetParams {
    /// tp1 distance in multiples of risk.
    pub tp1_multiple: f64,
    /// tp2 distance in multiples of risk.
    pub tp2_multiple: f64,
    /// Reward:risk reported when risk is zero.
    pub default_reward_risk: f64,
}

impl Default for TargetParams {
    fn default() -> Self {
        Self {
            tp1_multiple: 2.0,
            tp2_multiple: 3.0,
            default_reward_risk: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Confidence when trend and momentum disagree.
    pub neutral_confidence: f64,
    /// Confidence floor for a concordant trend/momentum reading.
    pub base_confidence: f64,
    /// Confidence added per RSI point beyond 50.
    pub rsi_slope: f64,
    /// Bonus when recent gaps agree with the chosen direction.
    pub structure_bonus: f64,
    pub s_threshold: u8,
    pub a_threshold: u8,
    pub b_threshold: u8,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            neutral_confidence: 50.0,
            base_confidence: 60.0,
            rsi_slope: 0.5,
            structure_bonus: 10.0,
            s_threshold: 85,
            a_threshold: 70,
            b_threshold: 55,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Minimum bar history required before an instrument is analyzed.
    pub min_bars: usize,
    /// Timeframe label stamped on every signal (e.g. "4h").
    pub timeframe: String,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            min_bars: 50,
            timeframe: "4h".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deterministic content hash, recorded with every scan result.
    pub fn config_hash(&self) -> Result<ConfigHash, ConfigError> {
        let json = serde_json::to_string(self)?;
        Ok(ConfigHash::from_bytes(json.as_bytes()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ind = &self.indicators;
        check_window("indicators.atr_period", ind.atr_period)?;
        check_window("indicators.rsi_period", ind.rsi_period)?;
        check_window("indicators.sma_fast", ind.sma_fast)?;
        check_window("indicators.sma_slow", ind.sma_slow)?;
        if ind.sma_slow <= ind.sma_fast {
            return Err(invalid(
                "indicators.sma_slow",
                format!("must be > sma_fast ({})", ind.sma_fast),
            ));
        }

        check_window("structure.swing_lookback", self.structure.swing_lookback)?;
        if self.structure.confirmation_window == 0 {
            return Err(invalid("structure.confirmation_window", "must be >= 1"));
        }

        let e = &self.entry;
        if !(0.0..=1.0).contains(&e.fvg_entry_ratio) {
            return Err(invalid("entry.fvg_entry_ratio", "must be within [0, 1]"));
        }
        check_fraction("entry.proximity_pct", e.proximity_pct)?;
        check_fraction("entry.order_block_offset_pct", e.order_block_offset_pct)?;
        check_fraction("entry.swing_offset_pct", e.swing_offset_pct)?;

        let s = &self.stop;
        check_fraction("stop.fvg_buffer_pct", s.fvg_buffer_pct)?;
        check_fraction("stop.order_block_buffer_pct", s.order_block_buffer_pct)?;
        check_fraction("stop.swing_buffer_pct", s.swing_buffer_pct)?;
        if !(s.atr_multiplier > 0.0) {
            return Err(invalid("stop.atr_multiplier", "must be > 0"));
        }

        let t = &self.targets;
        if !(t.tp1_multiple > 0.0) {
            return Err(invalid("targets.tp1_multiple", "must be > 0"));
        }
        if !(t.tp2_multiple > t.tp1_multiple) {
            return Err(invalid("targets.tp2_multiple", "must be > tp1_multiple"));
        }
        if !(t.default_reward_risk >= 0.0) {
            return Err(invalid("targets.default_reward_risk", "must be >= 0"));
        }

        let sc = &self.scoring;
        if !(sc.b_threshold <= sc.a_threshold && sc.a_threshold <= sc.s_threshold) {
            return Err(invalid(
                "scoring",
                "thresholds must satisfy b_threshold <= a_threshold <= s_threshold",
            ));
        }
        if sc.s_threshold > 100 {
            return Err(invalid("scoring.s_threshold", "must be <= 100"));
        }

        check_window("scan.min_bars", self.scan.min_bars)?;

        Ok(())
    }
}

fn check_window(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if (1..=MAX_WINDOW).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [1, {MAX_WINDOW}], got {value}")))
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be a fraction in [0, 1), got {value}")))
    }
}
