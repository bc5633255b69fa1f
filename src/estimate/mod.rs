//! Per-household estimates from the national series.
//!
//! Pipeline per point (ascending period order):
//! national millions -> whole dollars -> / households of that year -> trailing mean.

use serde::Serialize;

use crate::data::PopulationTable;
use crate::domain::{EnrichedObservation, SeriesRecord, SourceTag};
use crate::math::rolling::trailing_mean;

/// The input series is stated in millions of currency units.
pub const UNIT_SCALE: f64 = 1_000_000.0;

/// Trailing window for the rolling mean (months).
pub const ROLLING_WINDOW: usize = 12;

/// An enriched, non-empty series in ascending period order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedSeries {
    source: SourceTag,
    points: Vec<EnrichedObservation>,
}

impl EnrichedSeries {
    pub fn source(&self) -> SourceTag {
        self.source
    }

    pub fn points(&self) -> &[EnrichedObservation] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent observation.
    pub fn latest(&self) -> &EnrichedObservation {
        // Built from a non-empty `SeriesRecord`.
        &self.points[self.points.len() - 1]
    }
}

/// Join the series with the population step function.
pub fn enrich(series: &SeriesRecord, population: &PopulationTable) -> EnrichedSeries {
    let partial: Vec<(u64, f64, f64)> = series
        .points()
        .iter()
        .map(|p| {
            let households = population.for_period(p.period);
            let national_units = p.value * UNIT_SCALE;
            (households, national_units, national_units / households as f64)
        })
        .collect();

    let per_household: Vec<f64> = partial.iter().map(|(_, _, v)| *v).collect();
    let rolling = trailing_mean(&per_household, ROLLING_WINDOW);

    let points = series
        .points()
        .iter()
        .zip(partial)
        .zip(rolling)
        .map(|((point, (households, national_units, per_household)), rolling_mean)| EnrichedObservation {
            point: *point,
            households,
            national_units,
            per_household,
            rolling_mean,
        })
        .collect();

    EnrichedSeries {
        source: series.source(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::manual_series;
    use crate::math::units::round2;

    #[test]
    fn first_two_manual_points_match_worked_example() {
        let population = PopulationTable::australia().unwrap();
        let enriched = enrich(&manual_series(), &population);

        let p0 = &enriched.points()[0];
        let p1 = &enriched.points()[1];
        assert_eq!(p0.households, 10_800_000);
        assert_eq!(round2(p0.per_household), 1030.36);
        assert_eq!(round2(p1.per_household), 1030.98);

        // Window still growing: mean of the two available points.
        assert_eq!(p0.rolling_mean, p0.per_household);
        assert!((p1.rolling_mean - (p0.per_household + p1.per_household) / 2.0).abs() < 1e-9);
        assert_eq!(round2(p1.rolling_mean), 1030.67);
    }

    #[test]
    fn rolling_window_caps_at_twelve() {
        let population = PopulationTable::australia().unwrap();
        let enriched = enrich(&manual_series(), &population);
        let values: Vec<f64> = enriched.points().iter().map(|p| p.per_household).collect();

        let mean_0_11 = values[0..=11].iter().sum::<f64>() / 12.0;
        let mean_9_20 = values[9..=20].iter().sum::<f64>() / 12.0;
        assert!((enriched.points()[11].rolling_mean - mean_0_11).abs() < 1e-9);
        assert!((enriched.points()[20].rolling_mean - mean_9_20).abs() < 1e-9);
    }

    #[test]
    fn population_steps_by_year() {
        let population = PopulationTable::australia().unwrap();
        let enriched = enrich(&manual_series(), &population);
        assert_eq!(enriched.points()[11].households, 10_800_000);
        assert_eq!(enriched.points()[12].households, 11_000_000);
        assert_eq!(enriched.latest().point.period.to_string(), "2025-11");
        assert_eq!(enriched.source(), SourceTag::Manual);
    }

    #[test]
    fn enriched_rows_serialize_with_dashboard_keys() {
        let population = PopulationTable::australia().unwrap();
        let enriched = enrich(&manual_series(), &population);
        let json = serde_json::to_value(&enriched.points()[0]).unwrap();
        assert_eq!(json["month"], "2024-01");
        assert_eq!(json["households"], 10_800_000);
        assert_eq!(json["food_per_household_month"], 1030.36);
        assert_eq!(json["food_per_hh_12m_avg"], 1030.36);
    }
}
