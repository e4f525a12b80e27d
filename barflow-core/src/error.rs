//! Structured error types for the feed.

use crate::domain::BarField;
use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by feed construction and the query accessors.
///
/// Load-time variants are fatal: a partially loaded or misaligned dataset
/// would corrupt every downstream computation, so construction aborts on
/// the first one. Query-time variants are caller mistakes, returned
/// immediately and never retried. Exhaustion of the feed is not an error —
/// it is reported only through the continuation flag.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("unknown symbol '{symbol}' (not registered at construction)")]
    UnknownSymbol { symbol: String },

    #[error("unknown bar field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' is not carried by bars for '{symbol}'")]
    FieldUnavailable { symbol: String, field: BarField },

    #[error("no bars revealed yet for '{symbol}'")]
    NoHistory { symbol: String },

    #[error("malformed record for '{symbol}' at line {line}: {reason}")]
    MalformedRecord {
        symbol: String,
        line: u64,
        reason: String,
    },

    #[error("duplicate timestamp {timestamp} in series for '{symbol}'")]
    DuplicateTimestamp {
        symbol: String,
        timestamp: NaiveDateTime,
    },

    #[error("series for '{symbol}' contains no rows")]
    EmptySeries { symbol: String },

    #[error("'{symbol}' has no data at canonical timestamp {timestamp} (series begins later)")]
    MissingLeadingData {
        symbol: String,
        timestamp: NaiveDateTime,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid feed configuration: {0}")]
    Config(String),
}
