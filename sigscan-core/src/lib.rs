//! SigScan Core: domain types, indicators, structure detection, and signal composition.
//!
//! This crate contains the per-instrument signal engine:
//! - Domain types (bars, tickers, structure artifacts, signals, ids)
//! - Indicator library (ATR, SMA, RSI) with neutral defaults on short history
//! - Market-structure detection (swings, fair-value gaps, order blocks, breaks)
//! - Ordered entry and stop resolver chains
//! - Signal composer: direction, confidence, targets, rating
//!
//! Everything here is pure and I/O free. Batch orchestration over a universe
//! lives in `sigscan-runner`.

pub mod composer;
pub mod config;
pub mod domain;
pub mod indicators;
pub mod resolve;
pub mod structure;

pub use composer::{ComposeError, ComposeRequest, SignalComposer};
pub use config::{ConfigError, EngineConfig};
