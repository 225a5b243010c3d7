//! SigScan Runner: scan orchestration, data feeds, data health.
//!
//! This crate builds on `sigscan-core` to provide:
//! - Universe configuration (ordered symbol list, TOML)
//! - Market snapshot and freshness metadata, data-health summary
//! - Parallel scan orchestration with per-instrument failure isolation
//! - File-based feed loading (CSV bars, JSON tickers and freshness)
//! - Deterministic synthetic data

pub mod feed;
pub mod result;
pub mod scanner;
pub mod snapshot;
pub mod synthetic;
pub mod universe;

pub use feed::{load_bars_csv, load_snapshot_dir, load_tickers_json, FeedError};
pub use result::{FilterReason, FilteredInstrument, ScanResult};
pub use scanner::Scanner;
pub use snapshot::{
    DataHealth, Freshness, FreshnessState, HealthStatus, InstrumentData, MarketSnapshot,
};
pub use synthetic::synthetic_snapshot;
pub use universe::{Universe, UniverseError};
