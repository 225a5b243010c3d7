//! Direction, confidence, targets, and rating.

use serde::{Deserialize, Serialize};

use crate::config::{ScoringParams, TargetParams};
use crate::domain::{Classification, Direction, Rating};
use crate::indicators::IndicatorSnapshot;
use crate::structure::MarketStructure;

/// Direction chosen from trend (SMA fast vs slow) and momentum (RSI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionCall {
    pub direction: Direction,
    pub confidence: f64,
    /// Trend and momentum agreed on the direction.
    pub concordant: bool,
}

/// Pick a direction and base confidence.
///
/// Both SMAs must be available. Bullish trend with RSI above 50 is a long,
/// bearish trend with RSI below 50 a short; anything else (including missing
/// SMAs) is a neutral long.
pub fn call_direction(ind: &IndicatorSnapshot, params: &ScoringParams) -> DirectionCall {
    if let (Some(fast), Some(slow)) = (ind.sma_fast, ind.sma_slow) {
        if fast > slow && ind.rsi > 50.0 {
            return DirectionCall {
                direction: Direction::Long,
                confidence: params.base_confidence + params.rsi_slope * (ind.rsi - 50.0),
                concordant: true,
            };
        }
        if fast < slow && ind.rsi < 50.0 {
            return DirectionCall {
                direction: Direction::Short,
                confidence: params.base_confidence + params.rsi_slope * (50.0 - ind.rsi),
                concordant: true,
            };
        }
    }
    DirectionCall {
        direction: Direction::Long,
        confidence: params.neutral_confidence,
        concordant: false,
    }
}

/// Bonus when the recent gaps lean toward `direction`: strictly more
/// matching than opposing gaps among the last `window`.
pub fn confirmation_bonus(
    structure: &MarketStructure,
    direction: Direction,
    window: usize,
    bonus: f64,
) -> f64 {
    let (matching, opposing) = structure.recent_gap_votes(direction.matching_kind(), window);
    if matching > opposing {
        bonus
    } else {
        0.0
    }
}

/// Integer score in 0..=100, stored on the signal and used as the sort key.
pub fn confidence_score(confidence: f64) -> u8 {
    if confidence.is_nan() {
        return 0;
    }
    confidence.round().clamp(0.0, 100.0) as u8
}

/// Rating and classification from the unrounded confidence.
///
/// Thresholds compare against the raw value, so 84.5 is an A even though its
/// integer score is 85. A fallback (unsupported market) entry always grades
/// C/candidate, whatever the confidence.
pub fn grade(confidence: f64, fallback: bool, params: &ScoringParams) -> (Rating, Classification) {
    if fallback {
        return (Rating::C, Classification::Candidate);
    }
    if confidence >= f64::from(params.s_threshold) {
        (Rating::S, Classification::Tradable)
    } else if confidence >= f64::from(params.a_threshold) {
        (Rating::A, Classification::Tradable)
    } else if confidence >= f64::from(params.b_threshold) {
        (Rating::B, Classification::Tradable)
    } else {
        (Rating::C, Classification::Candidate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub tp1: f64,
    pub tp2: f64,
    pub reward_risk: f64,
}

/// Profit targets at fixed multiples of risk on the profitable side of entry.
pub fn targets(direction: Direction, entry: f64, stop: f64, params: &TargetParams) -> Targets {
    let risk = (entry - stop).abs();
    let sign = direction.sign();
    let tp1 = entry + sign * params.tp1_multiple * risk;
    let tp2 = entry + sign * params.tp2_multiple * risk;
    let reward_risk = if risk == 0.0 {
        params.default_reward_risk
    } else {
        sign * (tp1 - entry) / risk
    };
    Targets {
        tp1,
        tp2,
        reward_risk,
    }
}
