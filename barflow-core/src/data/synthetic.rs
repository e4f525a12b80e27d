//! Deterministic synthetic bar generation.
//!
//! A seeded random walk per symbol — the seed is BLAKE3 of the symbol name,
//! so the same symbol always produces the same series and different symbols
//! diverge. Feeds the synthetic source and the test suite; never a stand-in
//! for missing historical data.

use crate::domain::Bar;
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate one daily bar per weekday in `[start, end]`, walking from 100.0.
pub fn generate_bars(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        let weekday = current.weekday();
        if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
            current += Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64);

        bars.push(Bar {
            symbol: symbol.to_string(),
            timestamp: current.and_hms_opt(0, 0, 0).unwrap(),
            open,
            high,
            low,
            close,
            adj_close: close,
            volume,
            open_interest: None,
        });

        price = close;
        current += Duration::days(1);
    }

    bars
}
