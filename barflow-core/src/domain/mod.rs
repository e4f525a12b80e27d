//! Domain types for the feed.

pub mod bar;
pub mod field;

pub use bar::Bar;
pub use field::BarField;

/// Symbol type alias
pub type Symbol = String;
