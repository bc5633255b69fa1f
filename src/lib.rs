//! `foodspend` library crate.
//!
//! The binary (`foodspend`) is a thin wrapper around this library so that:
//!
//! - the derivation pipeline is testable without spawning processes or touching the network
//! - the dashboard payload can be produced by other front-ends

pub mod app;
pub mod cli;
pub mod data;
pub mod distribution;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
