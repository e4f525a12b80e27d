//! Synthetic feed for tests and dry runs.
//!
//! Generates deterministic per-symbol walks and runs them through the same
//! alignment and stepping machinery as the historical feed, so consumers
//! exercise identical code paths against fabricated-but-tagged data.

use crate::data::{align_series, generate_bars};
use crate::domain::{Bar, BarField};
use crate::error::FeedError;
use crate::events::EventSink;
use crate::feed::{DataFeed, FeedBuffers};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

pub struct SyntheticFeed {
    buffers: FeedBuffers,
    index: Vec<NaiveDateTime>,
}

impl SyntheticFeed {
    /// Generate a deterministic series per symbol over `[start, end]` and
    /// align them. Same symbols and range → identical feed.
    pub fn new(symbols: &[String], start: NaiveDate, end: NaiveDate) -> Result<Self, FeedError> {
        if symbols.is_empty() {
            return Err(FeedError::Config("at least one symbol is required".into()));
        }

        let mut native = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            let bars = generate_bars(symbol, start, end);
            if bars.is_empty() {
                return Err(FeedError::EmptySeries {
                    symbol: symbol.clone(),
                });
            }
            native.insert(symbol.clone(), bars);
        }

        let aligned = align_series(native)?;
        let index = aligned.index.clone();
        let buffers = FeedBuffers::new(symbols.to_vec(), aligned)?;
        Ok(Self { buffers, index })
    }

    /// The canonical timestamp index the feed steps along.
    pub fn canonical_index(&self) -> &[NaiveDateTime] {
        &self.index
    }
}

impl DataFeed for SyntheticFeed {
    fn symbols(&self) -> &[String] {
        self.buffers.symbols()
    }

    fn latest_bar(&self, symbol: &str) -> Result<&Bar, FeedError> {
        self.buffers.latest_bar(symbol)
    }

    fn latest_bars(&self, symbol: &str, n: usize) -> Result<&[Bar], FeedError> {
        self.buffers.latest_bars(symbol, n)
    }

    fn latest_timestamp(&self, symbol: &str) -> Result<NaiveDateTime, FeedError> {
        self.buffers.latest_timestamp(symbol)
    }

    fn latest_value(&self, symbol: &str, field: BarField) -> Result<f64, FeedError> {
        self.buffers.latest_value(symbol, field)
    }

    fn latest_values(
        &self,
        symbol: &str,
        field: BarField,
        n: usize,
    ) -> Result<Vec<f64>, FeedError> {
        self.buffers.latest_values(symbol, field, n)
    }

    fn advance(&mut self, events: &mut dyn EventSink) {
        self.buffers.step(events)
    }

    fn is_streaming(&self) -> bool {
        self.buffers.is_streaming()
    }
}
