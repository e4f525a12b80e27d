//! Multi-symbol time alignment.
//!
//! Builds the canonical timestamp index (sorted union of every symbol's
//! native timestamps) and reindexes each series onto it with forward-fill:
//! a slot absent from a symbol's native data repeats that symbol's most
//! recent earlier bar under the slot's timestamp. Values are never
//! interpolated and never back-filled; a slot before a symbol's first
//! native bar is a hard error.

use crate::domain::Bar;
use crate::error::FeedError;
use chrono::NaiveDateTime;
use std::collections::{BTreeSet, HashMap};
use tracing::info;

/// Series for multiple symbols on the canonical timeline.
#[derive(Debug, Clone)]
pub struct AlignedSeries {
    /// The canonical timestamp axis, ascending.
    pub index: Vec<NaiveDateTime>,
    /// Aligned bars per symbol; every inner Vec has `index.len()` entries.
    pub series: HashMap<String, Vec<Bar>>,
}

/// Align the given per-symbol series onto the union of their timestamps.
///
/// `native` must hold ascending, duplicate-free series (the loader
/// guarantees this).
pub fn align_series(native: HashMap<String, Vec<Bar>>) -> Result<AlignedSeries, FeedError> {
    let mut stamps = BTreeSet::new();
    for bars in native.values() {
        for bar in bars {
            stamps.insert(bar.timestamp);
        }
    }
    let index: Vec<NaiveDateTime> = stamps.into_iter().collect();

    let mut series = HashMap::with_capacity(native.len());
    for (symbol, bars) in native {
        let aligned = reindex(&symbol, &bars, &index)?;
        series.insert(symbol, aligned);
    }

    info!(
        symbols = series.len(),
        slots = index.len(),
        "aligned series onto canonical index"
    );

    Ok(AlignedSeries { index, series })
}

/// Forward-fill one symbol's series onto the canonical index.
///
/// Walks both sequences in lockstep; `last` tracks the most recent native
/// bar at or before the current slot.
fn reindex(symbol: &str, bars: &[Bar], index: &[NaiveDateTime]) -> Result<Vec<Bar>, FeedError> {
    let mut aligned = Vec::with_capacity(index.len());
    let mut next = 0usize;
    let mut last: Option<&Bar> = None;

    for &slot in index {
        while next < bars.len() && bars[next].timestamp <= slot {
            last = Some(&bars[next]);
            next += 1;
        }
        match last {
            Some(bar) if bar.timestamp == slot => aligned.push(bar.clone()),
            Some(bar) => {
                // carry prior values under the slot's timestamp
                let mut filled = bar.clone();
                filled.timestamp = slot;
                aligned.push(filled);
            }
            None => {
                return Err(FeedError::MissingLeadingData {
                    symbol: symbol.to_string(),
                    timestamp: slot,
                })
            }
        }
    }

    Ok(aligned)
}

/// Deterministic BLAKE3 fingerprint of an aligned dataset.
///
/// Covers symbols in sorted order and every bar's timestamp and values, so
/// the result is independent of map iteration order.
pub fn dataset_hash(aligned: &AlignedSeries) -> String {
    let mut hasher = blake3::Hasher::new();

    let mut symbols: Vec<&String> = aligned.series.keys().collect();
    symbols.sort();

    for symbol in symbols {
        hasher.update(symbol.as_bytes());
        for bar in &aligned.series[symbol.as_str()] {
            hasher.update(&bar.timestamp.and_utc().timestamp().to_le_bytes());
            hasher.update(&bar.open.to_le_bytes());
            hasher.update(&bar.high.to_le_bytes());
            hasher.update(&bar.low.to_le_bytes());
            hasher.update(&bar.close.to_le_bytes());
            hasher.update(&bar.adj_close.to_le_bytes());
            hasher.update(&bar.volume.to_le_bytes());
        }
    }

    hasher.finalize().to_hex().to_string()
}
