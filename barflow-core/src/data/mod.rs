//! Loading and alignment of per-symbol series.

pub mod align;
pub mod loader;
pub mod synthetic;

pub use align::{align_series, dataset_hash, AlignedSeries};
pub use loader::load_symbol_csv;
pub use synthetic::generate_bars;
