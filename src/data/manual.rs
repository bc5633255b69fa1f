//! Known-good monthly series used when the remote source is unavailable.
//!
//! Monthly Household Spending Indicator, food, seasonally adjusted, millions
//! of dollars, January 2024 to November 2025.

use crate::domain::{ObservationPoint, Period, SeriesRecord, SourceTag};

const FIRST_YEAR: i32 = 2024;

const FOOD_AUD_M_SA: [f64; 23] = [
    11127.9, 11134.6, 11109.6, 11105.4, 11181.1, 11167.1, //
    11225.8, 11293.2, 11333.0, 11375.7, 11471.5, 11444.5, //
    11527.0, 11641.4, 11842.0, 11820.3, 11839.4, 11993.4, //
    11981.1, 12003.9, 12075.6, 12205.9, 12292.4,
];

/// The literal fallback series, tagged `manual`.
pub fn manual_series() -> SeriesRecord {
    let points: Vec<ObservationPoint> = FOOD_AUD_M_SA
        .iter()
        .enumerate()
        .filter_map(|(i, &value)| {
            let year = FIRST_YEAR + (i / 12) as i32;
            let month = (i % 12) as u32 + 1;
            Period::new(year, month).map(|period| ObservationPoint { period, value })
        })
        .collect();

    match SeriesRecord::new(points, SourceTag::Manual) {
        Ok(series) => series,
        // Consecutive months from a fixed table: neither empty nor duplicated.
        Err(e) => unreachable!("manual series is malformed: {e}"),
    }
}
