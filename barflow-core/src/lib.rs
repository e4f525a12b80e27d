//! BarFlow Core — historical market-data feed for event-driven simulation.
//!
//! This crate presents a strictly causal, incrementally-revealed stream of
//! per-symbol OHLCV bars, so that at any simulated instant no consumer can
//! observe data from the future:
//! - Domain types (bars, queryable fields)
//! - Per-symbol CSV loading with strict validation
//! - Multi-symbol alignment onto a canonical timestamp index (forward-fill)
//! - The `DataFeed` contract shared by historical and synthetic sources
//! - Drip-feed stepping with per-symbol history buffers
//! - The market-event marker handed to the simulation queue

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod events;
pub mod feed;

pub use config::FeedConfig;
pub use domain::{Bar, BarField};
pub use error::FeedError;
pub use events::{Event, EventQueue, EventSink};
pub use feed::{DataFeed, HistoricCsvFeed, SyntheticFeed};
