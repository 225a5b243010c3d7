//! File-based data feed: load materialized bars, tickers, and freshness
//! metadata into a `MarketSnapshot`.
//!
//! Directory layout for [`load_snapshot_dir`]:
//! - `<SYMBOL>.csv` with header `time,open,high,low,close,volume`
//! - `tickers.json`: `{"BTCUSDT": {"last": ..., ...}, ...}` (optional)
//! - `freshness.json`: `{"BTCUSDT": {"state": "live", "age_secs": 0}, ...}` (optional)
//!
//! `time` is RFC 3339 or integer unix seconds. A symbol whose CSV file is
//! absent or unreadable is left out of the snapshot; the scanner then reports
//! it as having no data. Broken `tickers.json` / `freshness.json` files fail
//! the whole load.

use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sigscan_core::domain::{Bar, Ticker};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::snapshot::{Freshness, InstrumentData, MarketSnapshot};
use crate::universe::Universe;

pub const TICKERS_FILE: &str = "tickers.json";
pub const FRESHNESS_FILE: &str = "freshness.json";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse CSV {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("parse JSON {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{} row {row}: unrecognized timestamp '{value}'", path.display())]
    Timestamp {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("{} row {row}: bars must be strictly ascending by time", path.display())]
    Unordered { path: PathBuf, row: usize },

    #[error("{} row {row}: inconsistent OHLC values", path.display())]
    InvalidBar { path: PathBuf, row: usize },
}

#[derive(Debug, Deserialize)]
struct BarRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(secs) = raw.parse::<i64>() {
        return Utc.timestamp_opt(secs, 0).single();
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Load one instrument's bars from CSV.
///
/// Rows must be strictly ascending and pass [`Bar::is_sane`]: no NaN prices,
/// positive open and close, and high/low enclosing the body.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>, FeedError> {
    let csv_err = |source: csv::Error| FeedError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut bars: Vec<Bar> = Vec::new();
    for (i, row) in reader.deserialize::<BarRow>().enumerate() {
        let row = row.map_err(csv_err)?;
        // Header is line 1.
        let line = i + 2;
        let time = parse_time(&row.time).ok_or_else(|| FeedError::Timestamp {
            path: path.to_path_buf(),
            row: line,
            value: row.time.clone(),
        })?;
        if bars.last().is_some_and(|prev| prev.time >= time) {
            return Err(FeedError::Unordered {
                path: path.to_path_buf(),
                row: line,
            });
        }
        let bar = Bar {
            time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };
        if !bar.is_sane() {
            return Err(FeedError::InvalidBar {
                path: path.to_path_buf(),
                row: line,
            });
        }
        bars.push(bar);
    }
    Ok(bars)
}

fn load_json_map<T: DeserializeOwned>(path: &Path) -> Result<HashMap<String, T>, FeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| FeedError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a `{symbol: Ticker}` map.
pub fn load_tickers_json(path: &Path) -> Result<HashMap<String, Ticker>, FeedError> {
    load_json_map(path)
}

/// Load a `{symbol: Freshness}` map.
pub fn load_freshness_json(path: &Path) -> Result<HashMap<String, Freshness>, FeedError> {
    load_json_map(path)
}

/// Build a snapshot for `universe` from a data directory.
///
/// Symbols with no freshness entry default to `cached` with unknown age.
pub fn load_snapshot_dir(dir: &Path, universe: &Universe) -> Result<MarketSnapshot, FeedError> {
    let tickers_path = dir.join(TICKERS_FILE);
    let mut tickers = if tickers_path.is_file() {
        load_tickers_json(&tickers_path)?
    } else {
        HashMap::new()
    };
    let freshness_path = dir.join(FRESHNESS_FILE);
    let freshness = if freshness_path.is_file() {
        load_freshness_json(&freshness_path)?
    } else {
        HashMap::new()
    };

    let mut snapshot = MarketSnapshot::new();
    for symbol in universe.iter() {
        let csv_path = dir.join(format!("{symbol}.csv"));
        if !csv_path.is_file() {
            debug!(symbol, path = %csv_path.display(), "no bar file");
            continue;
        }
        let bars = match load_bars_csv(&csv_path) {
            Ok(bars) => bars,
            Err(err) => {
                warn!(symbol, error = %err, "skipping unreadable bar file");
                continue;
            }
        };
        debug!(symbol, bars = bars.len(), "loaded bars");
        snapshot.insert(
            symbol,
            InstrumentData {
                bars,
                ticker: tickers.remove(symbol),
                freshness: freshness.get(symbol).copied().unwrap_or_default(),
            },
        );
    }
    Ok(snapshot)
}
