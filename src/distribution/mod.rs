//! Distributional breakdowns derived from the static survey tables.
//!
//! - `engine`: derived rows, income shares, modeled cross-tab
//! - `summary`: headline ranges, per-person summary, chart series

pub mod engine;
pub mod summary;

pub use engine::*;
pub use summary::*;
