//! Bar — the fundamental market data unit.

use crate::domain::BarField;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV(+OI) bar for a single symbol at a single timestamp.
///
/// Built once at load/alignment time and never mutated afterwards. Bars on
/// the aligned timeline may repeat a symbol's prior values (forward-fill);
/// those carry the canonical timestamp of the slot they fill, not the
/// timestamp of the bar they were copied from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
    /// Not part of the file schema; live or synthetic sources may carry it.
    pub open_interest: Option<u64>,
}

impl Bar {
    /// Scalar value of `field`, or `None` when the bar does not carry it
    /// (open interest on file-backed bars).
    pub fn value(&self, field: BarField) -> Option<f64> {
        match field {
            BarField::Open => Some(self.open),
            BarField::High => Some(self.high),
            BarField::Low => Some(self.low),
            BarField::Close => Some(self.close),
            BarField::AdjClose => Some(self.adj_close),
            BarField::Volume => Some(self.volume as f64),
            BarField::OpenInterest => self.open_interest.map(|oi| oi as f64),
        }
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
