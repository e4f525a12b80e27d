//! The feed contract and its concrete sources.
//!
//! `DataFeed` decouples every downstream consumer from the data source:
//! historical replay and (future) live ingestion look identical to the rest
//! of the simulator. Concrete sources:
//! - `HistoricCsvFeed` — per-symbol CSV files, aligned and drip-fed
//! - `SyntheticFeed` — deterministic generated bars for tests and dry runs

pub mod buffers;
pub mod historic;
pub mod synthetic;

pub use buffers::FeedBuffers;
pub use historic::HistoricCsvFeed;
pub use synthetic::SyntheticFeed;

use crate::domain::{Bar, BarField};
use crate::error::FeedError;
use crate::events::EventSink;
use chrono::NaiveDateTime;

/// Capability contract every bar source must satisfy.
///
/// Accessors read only from already-revealed history — a source built on
/// `FeedBuffers` cannot leak future data to a consumer. `advance` is the
/// single mutating operation and is invoked by exactly one driving loop;
/// accessors are plain `&self` reads made between steps.
pub trait DataFeed {
    /// Symbols registered at construction, in stepping order.
    fn symbols(&self) -> &[String];

    /// The most recently revealed bar for `symbol`.
    fn latest_bar(&self, symbol: &str) -> Result<&Bar, FeedError>;

    /// The last `n` revealed bars, oldest first. Returns fewer than `n`
    /// (possibly none) while history is short — callers must tolerate short
    /// slices at the start of a run.
    fn latest_bars(&self, symbol: &str, n: usize) -> Result<&[Bar], FeedError>;

    /// Timestamp of the most recently revealed bar.
    fn latest_timestamp(&self, symbol: &str) -> Result<NaiveDateTime, FeedError>;

    /// One scalar field of the most recently revealed bar.
    fn latest_value(&self, symbol: &str, field: BarField) -> Result<f64, FeedError>;

    /// `field` over the last `n` revealed bars, same order and
    /// short-history behavior as `latest_bars`.
    fn latest_values(&self, symbol: &str, field: BarField, n: usize)
        -> Result<Vec<f64>, FeedError>;

    /// Reveal the next bar for every symbol and emit one market event to
    /// `events`. A complete no-op once every series is exhausted.
    fn advance(&mut self, events: &mut dyn EventSink);

    /// True while at least the expected data remains; false from the first
    /// step that found any symbol's series exhausted.
    fn is_streaming(&self) -> bool;
}
