//! Feed configuration — data directory and registered symbols.
//!
//! Owned by the caller (the simulation driver); the feed itself never goes
//! looking for configuration files. Stored as TOML:
//!
//! ```toml
//! data_dir = "data"
//! symbols = ["AAPL", "MSFT", "SPY"]
//! ```

use crate::error::FeedError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Directory holding one `<symbol>.csv` per registered symbol.
    pub data_dir: PathBuf,
    /// Symbols to register, in the order stepping visits them.
    pub symbols: Vec<String>,
}

impl FeedConfig {
    pub fn new(data_dir: impl Into<PathBuf>, symbols: Vec<String>) -> Result<Self, FeedError> {
        let config = Self {
            data_dir: data_dir.into(),
            symbols,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a feed configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, FeedError> {
        let content = std::fs::read_to_string(path).map_err(|e| FeedError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a feed configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, FeedError> {
        let config: Self = toml::from_str(content).map_err(|e| FeedError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Path to the data file for one symbol: `<data_dir>/<symbol>.csv`.
    pub fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{symbol}.csv"))
    }

    fn validate(&self) -> Result<(), FeedError> {
        if self.symbols.is_empty() {
            return Err(FeedError::Config("at least one symbol is required".into()));
        }
        let mut seen = HashSet::new();
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(FeedError::Config(format!("duplicate symbol '{symbol}'")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml() {
        let config = FeedConfig::from_toml(
            r#"
            data_dir = "data"
            symbols = ["AAPL", "MSFT"]
            "#,
        )
        .unwrap();

        assert_eq!(config.symbols, vec!["AAPL", "MSFT"]);
        assert_eq!(config.symbol_path("AAPL"), PathBuf::from("data/AAPL.csv"));
    }

    #[test]
    fn rejects_empty_symbol_list() {
        let result = FeedConfig::from_toml(
            r#"
            data_dir = "data"
            symbols = []
            "#,
        );
        assert!(matches!(result, Err(FeedError::Config(_))));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let result = FeedConfig::new("data", vec!["SPY".into(), "SPY".into()]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("duplicate symbol 'SPY'"));
    }

    #[test]
    fn toml_roundtrip() {
        let config = FeedConfig::new("data", vec!["SPY".into()]).unwrap();
        let serialized = toml::to_string(&config).unwrap();
        let reparsed = FeedConfig::from_toml(&serialized).unwrap();
        assert_eq!(reparsed.symbols, config.symbols);
        assert_eq!(reparsed.data_dir, config.data_dir);
    }
}
