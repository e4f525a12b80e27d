//! Property tests for alignment and stepping invariants.
//!
//! Uses proptest to verify:
//! 1. Alignment correctness — every aligned value is the native value at
//!    that timestamp, or the latest earlier native value
//! 2. Alignment shape — every aligned series spans the full canonical index
//! 3. Leading gaps — alignment fails exactly when a symbol starts late
//! 4. Short-history tolerance — lookback length is min(n, revealed)

use barflow_core::data::align_series;
use barflow_core::domain::Bar;
use barflow_core::events::EventQueue;
use barflow_core::feed::FeedBuffers;
use barflow_core::FeedError;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use std::collections::HashMap;

const GRID_DAYS: u32 = 14;

fn ts(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1 + day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn bar(symbol: &str, day: u32, close: f64) -> Bar {
    Bar {
        symbol: symbol.into(),
        timestamp: ts(day),
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        adj_close: close,
        volume: 1_000 + day as u64,
        open_interest: None,
    }
}

/// A symbol's native days: a non-empty subset of the day grid.
fn arb_native_days() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(0..GRID_DAYS, 1..=10usize)
        .prop_map(|set| set.into_iter().collect())
}

fn build_series(symbol: &str, days: &[u32]) -> Vec<Bar> {
    days.iter()
        .map(|&d| bar(symbol, d, 10.0 + d as f64))
        .collect()
}

proptest! {
    /// Aligned values equal the native value at that slot, or the value at
    /// the latest earlier native slot.
    #[test]
    fn aligned_values_are_native_or_carried(
        days_a in arb_native_days(),
        days_b in arb_native_days(),
    ) {
        // force a shared start so alignment succeeds
        let mut days_a = days_a;
        let mut days_b = days_b;
        if !days_a.contains(&0) { days_a.insert(0, 0); }
        if !days_b.contains(&0) { days_b.insert(0, 0); }

        let mut native = HashMap::new();
        native.insert("A".to_string(), build_series("A", &days_a));
        native.insert("B".to_string(), build_series("B", &days_b));

        let aligned = align_series(native).unwrap();

        for (symbol, days) in [("A", &days_a), ("B", &days_b)] {
            for (slot, bar) in aligned.index.iter().zip(&aligned.series[symbol]) {
                prop_assert_eq!(&bar.timestamp, slot);

                // the expected source is the latest native day at or before the slot
                let source = days
                    .iter()
                    .rev()
                    .find(|&&d| ts(d) <= *slot)
                    .expect("day 0 is always native");
                prop_assert_eq!(bar.close, 10.0 + *source as f64);
            }
        }
    }

    /// Every aligned series has exactly one bar per canonical slot.
    #[test]
    fn aligned_series_span_the_index(
        days_a in arb_native_days(),
        days_b in arb_native_days(),
    ) {
        let mut days_a = days_a;
        let mut days_b = days_b;
        if !days_a.contains(&0) { days_a.insert(0, 0); }
        if !days_b.contains(&0) { days_b.insert(0, 0); }

        let union: std::collections::BTreeSet<u32> =
            days_a.iter().chain(days_b.iter()).copied().collect();

        let mut native = HashMap::new();
        native.insert("A".to_string(), build_series("A", &days_a));
        native.insert("B".to_string(), build_series("B", &days_b));

        let aligned = align_series(native).unwrap();

        prop_assert_eq!(aligned.index.len(), union.len());
        for bars in aligned.series.values() {
            prop_assert_eq!(bars.len(), aligned.index.len());
        }
    }

    /// Alignment succeeds iff every symbol is native on the earliest
    /// canonical slot; otherwise it names the late symbol.
    #[test]
    fn leading_gap_detection(
        days_a in arb_native_days(),
        days_b in arb_native_days(),
    ) {
        let first_a = days_a[0];
        let first_b = days_b[0];

        let mut native = HashMap::new();
        native.insert("A".to_string(), build_series("A", &days_a));
        native.insert("B".to_string(), build_series("B", &days_b));

        match align_series(native) {
            Ok(_) => prop_assert_eq!(first_a, first_b),
            Err(FeedError::MissingLeadingData { symbol, .. }) => {
                prop_assert_ne!(first_a, first_b);
                let late = if first_a > first_b { "A" } else { "B" };
                prop_assert_eq!(symbol, late);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// After k steps, a lookback of n returns min(n, k) bars.
    #[test]
    fn lookback_length_is_min_n_k(
        steps in 0usize..20,
        lookback in 0usize..25,
    ) {
        let days: Vec<u32> = (0..GRID_DAYS).collect();
        let mut native = HashMap::new();
        native.insert("A".to_string(), build_series("A", &days));
        let aligned = align_series(native).unwrap();
        let mut buffers = FeedBuffers::new(vec!["A".into()], aligned).unwrap();
        let mut queue = EventQueue::new();

        for _ in 0..steps {
            buffers.step(&mut queue);
        }

        let revealed = steps.min(GRID_DAYS as usize);
        let bars = buffers.latest_bars("A", lookback).unwrap();
        prop_assert_eq!(bars.len(), lookback.min(revealed));
    }
}
