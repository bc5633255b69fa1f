//! Numeric helpers: unit/inflation conversions and rolling aggregates.

pub mod rolling;
pub mod units;

pub use rolling::*;
pub use units::*;
