//! Signal composer: turns one instrument's bars and ticker into a `Signal`.
//!
//! Composition steps:
//! - indicator snapshot (ATR, RSI, fast/slow SMA)
//! - direction and base confidence from trend and momentum
//! - structure confirmation bonus from the most recent gaps
//! - entry and stop from the resolver chains
//! - targets, reward:risk, rating and classification
//!
//! The composer is pure. It reads the config and its inputs and returns a
//! fresh, immutable `Signal`; ids and timestamps are supplied by the caller.

pub mod scoring;

pub use scoring::{
    call_direction, confidence_score, confirmation_bonus, grade, targets, DirectionCall, Targets,
};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::trace;

use crate::config::EngineConfig;
use crate::domain::{Bar, Signal, SignalId, SignalStatus, Ticker};
use crate::indicators::IndicatorSnapshot;
use crate::resolve::{resolve_entry, resolve_stop, ResolveContext};
use crate::structure::analyze;

#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    #[error("no bars to analyze")]
    EmptyBars,

    #[error("ticker last price must be finite and positive, got {0}")]
    InvalidTicker(f64),

    #[error("{field} is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },
}

/// Everything the composer needs for one instrument.
#[derive(Debug, Clone, Copy)]
pub struct ComposeRequest<'a> {
    pub id: SignalId,
    pub symbol: &'a str,
    pub bars: &'a [Bar],
    pub ticker: &'a Ticker,
    pub generated_at: DateTime<Utc>,
}

/// Binds an `EngineConfig` to the composition pipeline.
#[derive(Debug, Clone, Copy)]
pub struct SignalComposer<'a> {
    config: &'a EngineConfig,
}

impl<'a> SignalComposer<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    pub fn compose(&self, req: ComposeRequest<'_>) -> Result<Signal, ComposeError> {
        if req.bars.is_empty() {
            return Err(ComposeError::EmptyBars);
        }
        if !req.ticker.has_valid_last() {
            return Err(ComposeError::InvalidTicker(req.ticker.last));
        }
        let config = self.config;
        let current_price = req.ticker.last;

        let indicators = IndicatorSnapshot::compute(req.bars, &config.indicators);
        let structure = analyze(req.bars, &config.structure);

        let call = call_direction(&indicators, &config.scoring);
        let confidence = call.confidence
            + confirmation_bonus(
                &structure,
                call.direction,
                config.structure.confirmation_window,
                config.scoring.structure_bonus,
            );

        let ctx = ResolveContext {
            direction: call.direction,
            structure: &structure,
            current_price,
            atr: indicators.atr,
            config,
        };
        let entry = resolve_entry(&ctx);
        let stop = resolve_stop(&ctx, entry.price);
        trace!(
            symbol = req.symbol,
            direction = call.direction.as_str(),
            entry_type = %entry.entry_type,
            stop_type = %stop.stop_type,
            "resolved levels"
        );

        let tp = targets(call.direction, entry.price, stop.price, &config.targets);
        for (field, value) in [
            ("entry_price", entry.price),
            ("stop_price", stop.price),
            ("tp1", tp.tp1),
            ("tp2", tp.tp2),
            ("reward_risk_ratio", tp.reward_risk),
        ] {
            if !value.is_finite() {
                return Err(ComposeError::NonFinite { field, value });
            }
        }

        let score = confidence_score(confidence);
        let (rating, classification) = grade(confidence, entry.fallback, &config.scoring);
        let status = if entry.tradable {
            SignalStatus::Active
        } else {
            SignalStatus::AwaitingRetest
        };

        Ok(Signal {
            id: req.id,
            symbol: req.symbol.to_string(),
            direction: call.direction,
            entry_price: entry.price,
            entry_type: entry.entry_type,
            entry_rationale: entry.rationale,
            current_price,
            stop_price: stop.price,
            stop_type: stop.stop_type,
            stop_rationale: stop.rationale,
            tp1: tp.tp1,
            tp2: tp.tp2,
            reward_risk_ratio: tp.reward_risk,
            rating,
            confidence_score: score,
            classification,
            status,
            timeframe: config.scan.timeframe.clone(),
            structure_snapshot: structure.snapshot(config.structure.snapshot_len),
            atr: indicators.atr,
            generated_at: req.generated_at,
        })
    }
}
