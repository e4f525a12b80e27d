//! Per-symbol stepping state and the query/buffer accessor.
//!
//! Both concrete feeds delegate here. Consumers only ever see the history
//! buffers; the aligned series and cursors stay private to stepping, which
//! makes the no-lookahead guarantee structural rather than a convention.

use crate::data::AlignedSeries;
use crate::domain::{Bar, BarField, Symbol};
use crate::error::FeedError;
use crate::events::{Event, EventSink};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::debug;

/// Stepping state for one symbol: the aligned series, a forward-only cursor
/// into it, and the append-only buffer of revealed bars.
#[derive(Debug)]
struct SymbolState {
    series: Vec<Bar>,
    cursor: usize,
    history: Vec<Bar>,
}

/// Registration-ordered per-symbol state plus the continuation flag.
///
/// Constructed once per run; the map never changes shape afterwards, only
/// the cursors move and the history buffers append.
#[derive(Debug)]
pub struct FeedBuffers {
    symbols: Vec<Symbol>,
    states: HashMap<Symbol, SymbolState>,
    streaming: bool,
}

impl FeedBuffers {
    /// Build stepping state from aligned series. `symbols` fixes the
    /// stepping order and must each be present in `aligned`.
    pub fn new(symbols: Vec<Symbol>, aligned: AlignedSeries) -> Result<Self, FeedError> {
        let mut series_map = aligned.series;
        let mut states = HashMap::with_capacity(symbols.len());
        for symbol in &symbols {
            let series =
                series_map
                    .remove(symbol)
                    .ok_or_else(|| FeedError::UnknownSymbol {
                        symbol: symbol.clone(),
                    })?;
            states.insert(
                symbol.clone(),
                SymbolState {
                    series,
                    cursor: 0,
                    history: Vec::new(),
                },
            );
        }
        Ok(Self {
            symbols,
            states,
            streaming: true,
        })
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Reveal the next aligned bar for every symbol, in registration order.
    ///
    /// Emits one `Event::Market` if any bar was revealed. The continuation
    /// flag drops on the first exhausted series encountered; once every
    /// series is exhausted the call reveals nothing and emits nothing.
    pub fn step(&mut self, events: &mut dyn EventSink) {
        let mut revealed = 0usize;
        for symbol in &self.symbols {
            if let Some(state) = self.states.get_mut(symbol) {
                if state.cursor < state.series.len() {
                    state.history.push(state.series[state.cursor].clone());
                    state.cursor += 1;
                    revealed += 1;
                } else {
                    self.streaming = false;
                }
            }
        }

        if revealed > 0 {
            events.put(Event::Market);
            debug!(revealed, streaming = self.streaming, "step complete");
        }
    }

    fn state(&self, symbol: &str) -> Result<&SymbolState, FeedError> {
        self.states
            .get(symbol)
            .ok_or_else(|| FeedError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }

    pub fn latest_bar(&self, symbol: &str) -> Result<&Bar, FeedError> {
        self.state(symbol)?
            .history
            .last()
            .ok_or_else(|| FeedError::NoHistory {
                symbol: symbol.to_string(),
            })
    }

    pub fn latest_bars(&self, symbol: &str, n: usize) -> Result<&[Bar], FeedError> {
        let history = &self.state(symbol)?.history;
        Ok(&history[history.len().saturating_sub(n)..])
    }

    pub fn latest_timestamp(&self, symbol: &str) -> Result<NaiveDateTime, FeedError> {
        Ok(self.latest_bar(symbol)?.timestamp)
    }

    pub fn latest_value(&self, symbol: &str, field: BarField) -> Result<f64, FeedError> {
        let bar = self.latest_bar(symbol)?;
        bar.value(field).ok_or_else(|| FeedError::FieldUnavailable {
            symbol: symbol.to_string(),
            field,
        })
    }

    pub fn latest_values(
        &self,
        symbol: &str,
        field: BarField,
        n: usize,
    ) -> Result<Vec<f64>, FeedError> {
        self.latest_bars(symbol, n)?
            .iter()
            .map(|bar| {
                bar.value(field).ok_or_else(|| FeedError::FieldUnavailable {
                    symbol: symbol.to_string(),
                    field,
                })
            })
            .collect()
    }
}
