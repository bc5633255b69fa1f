//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - monthly series records (`Period`, `SeriesRecord`, `EnrichedObservation`)
//! - dashboard projections (`SummaryStats`, `ChartWindow`)
//! - survey tables and their derived rows (`SurveyEntry`, `DerivedSurveyEntry`, `CrossTab`)

pub mod survey;
pub mod types;

pub use survey::*;
pub use types::*;
