//! Household counts by year.
//!
//! The count is a step function: every month of a year uses that year's
//! figure. Years outside the table use the most recent defined year.

use std::collections::BTreeMap;

use crate::domain::Period;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationTable {
    households: BTreeMap<i32, u64>,
}

impl PopulationTable {
    pub fn new(entries: impl IntoIterator<Item = (i32, u64)>) -> Result<Self, AppError> {
        let households: BTreeMap<i32, u64> = entries.into_iter().collect();
        if households.is_empty() {
            return Err(AppError::config("Population table must define at least one year."));
        }
        if let Some((year, _)) = households.iter().find(|(_, count)| **count == 0) {
            return Err(AppError::config(format!(
                "Population table has a zero household count for {year}."
            )));
        }
        Ok(Self { households })
    }

    /// Australian household estimates used by the dashboard.
    pub fn australia() -> Result<Self, AppError> {
        Self::new([(2023, 10_600_000), (2024, 10_800_000), (2025, 11_000_000)])
    }

    pub fn for_year(&self, year: i32) -> u64 {
        match self.households.get(&year) {
            Some(count) => *count,
            None => self.latest().1,
        }
    }

    pub fn for_period(&self, period: Period) -> u64 {
        self.for_year(period.year())
    }

    /// The most recent defined year and its count.
    pub fn latest(&self) -> (i32, u64) {
        // Non-empty by construction.
        self.households
            .iter()
            .next_back()
            .map(|(y, c)| (*y, *c))
            .unwrap_or((0, 1))
    }
}
