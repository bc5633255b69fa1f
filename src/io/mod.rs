//! Output helpers.
//!
//! - series CSV export (`export`)
//! - dashboard JSON export (`export`)

pub mod export;

pub use export::*;
