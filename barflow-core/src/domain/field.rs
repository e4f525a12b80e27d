//! Queryable scalar fields of a bar.

use crate::error::FeedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of per-bar scalars a consumer may query.
///
/// String-typed boundaries (config files, CLI flags) resolve names through
/// `FromStr`; inside the crate the typed API cannot name a field outside
/// this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarField {
    Open,
    High,
    Low,
    Close,
    AdjClose,
    Volume,
    OpenInterest,
}

impl BarField {
    /// Canonical lowercase name, matching the input-file header vocabulary.
    pub fn name(&self) -> &'static str {
        match self {
            BarField::Open => "open",
            BarField::High => "high",
            BarField::Low => "low",
            BarField::Close => "close",
            BarField::AdjClose => "adjusted_close",
            BarField::Volume => "volume",
            BarField::OpenInterest => "open_interest",
        }
    }
}

impl fmt::Display for BarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BarField {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(BarField::Open),
            "high" => Ok(BarField::High),
            "low" => Ok(BarField::Low),
            "close" => Ok(BarField::Close),
            "adjusted_close" | "adj_close" => Ok(BarField::AdjClose),
            "volume" => Ok(BarField::Volume),
            "open_interest" => Ok(BarField::OpenInterest),
            other => Err(FeedError::UnknownField(other.to_string())),
        }
    }
}
