//! Per-symbol CSV loading with strict validation.
//!
//! One file per symbol: a header row followed by
//! `datetime, open, high, low, close, adjusted_close, volume` columns.
//! Columns are header-named, so on-disk column order does not matter; row
//! order does not matter either — the loader sorts ascending by timestamp.
//! Any row that fails to parse aborts the load: a partially loaded symbol
//! would break the alignment invariant downstream.

use crate::domain::Bar;
use crate::error::FeedError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk row shape. `datetime` stays a string until `parse_timestamp`
/// decides between the date-only and full-datetime forms.
#[derive(Debug, Deserialize)]
struct RawRecord {
    datetime: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    adjusted_close: f64,
    volume: u64,
}

/// Parse `%Y-%m-%d %H:%M:%S` or `%Y-%m-%d` (a bare date means midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Load and validate the series for one symbol.
///
/// Returns bars sorted ascending by timestamp. Fails on unreadable files,
/// unparsable rows, duplicate timestamps, and empty series.
pub fn load_symbol_csv(symbol: &str, path: &Path) -> Result<Vec<Bar>, FeedError> {
    let file = std::fs::File::open(path).map_err(|e| FeedError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut bars = Vec::new();
    for (i, result) in reader.deserialize::<RawRecord>().enumerate() {
        // line 1 is the header row
        let line = i as u64 + 2;
        let record = result.map_err(|e| FeedError::MalformedRecord {
            symbol: symbol.to_string(),
            line,
            reason: e.to_string(),
        })?;
        let timestamp =
            parse_timestamp(&record.datetime).ok_or_else(|| FeedError::MalformedRecord {
                symbol: symbol.to_string(),
                line,
                reason: format!("unparsable datetime '{}'", record.datetime),
            })?;

        let bar = Bar {
            symbol: symbol.to_string(),
            timestamp,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            adj_close: record.adjusted_close,
            volume: record.volume,
            open_interest: None,
        };
        if !bar.is_sane() {
            warn!(symbol, line, "suspicious OHLC range in input row");
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(FeedError::EmptySeries {
            symbol: symbol.to_string(),
        });
    }

    bars.sort_by_key(|b| b.timestamp);

    for pair in bars.windows(2) {
        if pair[0].timestamp == pair[1].timestamp {
            return Err(FeedError::DuplicateTimestamp {
                symbol: symbol.to_string(),
                timestamp: pair[0].timestamp,
            });
        }
    }

    debug!(
        symbol,
        rows = bars.len(),
        first = %bars.first().unwrap().timestamp,
        last = %bars.last().unwrap().timestamp,
        "loaded symbol series"
    );

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_data_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("barflow_loader_{}_{id}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_csv(dir: &Path, symbol: &str, body: &str) -> PathBuf {
        let path = dir.join(format!("{symbol}.csv"));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_and_sorts_rows() {
        let dir = temp_data_dir();
        // rows intentionally out of order
        let path = write_csv(
            &dir,
            "SPY",
            "datetime,open,high,low,close,adjusted_close,volume\n\
             2024-01-03,101.0,103.0,100.0,102.0,102.0,1100\n\
             2024-01-02,100.0,102.0,99.0,101.0,101.0,1000\n",
        );

        let bars = load_symbol_csv("SPY", &path).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 101.0);
        assert_eq!(bars[1].close, 102.0);
        assert!(bars[0].timestamp < bars[1].timestamp);
        assert_eq!(bars[0].symbol, "SPY");
        assert_eq!(bars[0].open_interest, None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn accepts_full_datetime_rows() {
        let dir = temp_data_dir();
        let path = write_csv(
            &dir,
            "ES",
            "datetime,open,high,low,close,adjusted_close,volume\n\
             2024-01-02 09:31:00,100.0,101.0,99.5,100.5,100.5,50\n\
             2024-01-02 09:30:00,99.0,100.0,98.5,100.0,100.0,40\n",
        );

        let bars = load_symbol_csv("ES", &path).unwrap();
        assert_eq!(bars[0].timestamp, parse_timestamp("2024-01-02 09:30:00").unwrap());
        assert_eq!(bars[1].timestamp, parse_timestamp("2024-01-02 09:31:00").unwrap());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn header_order_does_not_matter() {
        let dir = temp_data_dir();
        let path = write_csv(
            &dir,
            "SPY",
            "volume,datetime,close,open,high,low,adjusted_close\n\
             1000,2024-01-02,101.0,100.0,102.0,99.0,101.0\n",
        );

        let bars = load_symbol_csv("SPY", &path).unwrap();
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].volume, 1000);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_row_is_fatal() {
        let dir = temp_data_dir();
        let path = write_csv(
            &dir,
            "SPY",
            "datetime,open,high,low,close,adjusted_close,volume\n\
             2024-01-02,100.0,102.0,99.0,101.0,101.0,1000\n\
             2024-01-03,not-a-price,103.0,100.0,102.0,102.0,1100\n",
        );

        let err = load_symbol_csv("SPY", &path).unwrap_err();
        assert!(matches!(
            err,
            FeedError::MalformedRecord { line: 3, .. }
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unparsable_datetime_is_fatal() {
        let dir = temp_data_dir();
        let path = write_csv(
            &dir,
            "SPY",
            "datetime,open,high,low,close,adjusted_close,volume\n\
             02/01/2024,100.0,102.0,99.0,101.0,101.0,1000\n",
        );

        let err = load_symbol_csv("SPY", &path).unwrap_err();
        assert!(err.to_string().contains("unparsable datetime"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn duplicate_timestamp_is_fatal() {
        let dir = temp_data_dir();
        let path = write_csv(
            &dir,
            "SPY",
            "datetime,open,high,low,close,adjusted_close,volume\n\
             2024-01-02,100.0,102.0,99.0,101.0,101.0,1000\n\
             2024-01-02,100.5,102.5,99.5,101.5,101.5,1001\n",
        );

        let err = load_symbol_csv("SPY", &path).unwrap_err();
        assert!(matches!(err, FeedError::DuplicateTimestamp { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_file_is_fatal() {
        let dir = temp_data_dir();
        let path = write_csv(
            &dir,
            "SPY",
            "datetime,open,high,low,close,adjusted_close,volume\n",
        );

        let err = load_symbol_csv("SPY", &path).unwrap_err();
        assert!(matches!(err, FeedError::EmptySeries { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = temp_data_dir();
        let path = dir.join("GHOST.csv");

        let err = load_symbol_csv("GHOST", &path).unwrap_err();
        assert!(err.to_string().contains("GHOST.csv"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
