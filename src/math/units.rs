//! Unit and inflation conversions.
//!
//! Survey tables quote weekly amounts in 2015-16 dollars; the dashboard shows
//! monthly amounts in 2025 dollars. All helpers here are pure and operate on
//! unrounded values. Rounding is a presentation concern (`round2`, `round0`).

use serde::{Serialize, Serializer};

/// Average number of weeks in a calendar month.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Days per week.
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Food CPI movement from 2015-16 to 2025 (June quarter 2016 = 107.0,
/// December quarter 2025 estimate = 140.3).
pub const FOOD_CPI_FACTOR: f64 = 1.31;

/// All-groups CPI movement over the same window.
pub const GENERAL_CPI_FACTOR: f64 = 1.36;

/// Which price index an adjustment is based on.
///
/// There is deliberately no default: every caller names the basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CpiBasis {
    General,
    Food,
}

impl CpiBasis {
    pub fn label(self) -> &'static str {
        match self {
            CpiBasis::General => "All groups CPI",
            CpiBasis::Food => "Food CPI",
        }
    }
}

/// The pair of inflation factors used by a derivation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InflationFactors {
    pub general: f64,
    pub food: f64,
}

impl Default for InflationFactors {
    fn default() -> Self {
        Self {
            general: GENERAL_CPI_FACTOR,
            food: FOOD_CPI_FACTOR,
        }
    }
}

impl InflationFactors {
    pub fn factor(&self, basis: CpiBasis) -> f64 {
        match basis {
            CpiBasis::General => self.general,
            CpiBasis::Food => self.food,
        }
    }

    /// Human-readable description, e.g. `31% increase (2016 to 2025)`.
    pub fn describe(&self, basis: CpiBasis, from: &str, to: &str) -> String {
        format!(
            "{:.0}% increase ({from} to {to})",
            (self.factor(basis) - 1.0) * 100.0
        )
    }
}

pub fn to_monthly(weekly: f64) -> f64 {
    weekly * WEEKS_PER_MONTH
}

pub fn to_daily(weekly: f64) -> f64 {
    weekly / DAYS_PER_WEEK
}

pub fn adjust_for_inflation(value: f64, factor: f64) -> f64 {
    value * factor
}

/// Round to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to whole currency units.
pub fn round0(value: f64) -> f64 {
    value.round()
}

/// `serialize_with` helper: money rounded to cents.
pub fn serialize_money<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round2(*value))
}

/// `serialize_with` helper: optional money rounded to cents.
pub fn serialize_money_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&round2(*v)),
        None => serializer.serialize_none(),
    }
}

/// `serialize_with` helper: a sequence of money values rounded to cents.
#[allow(clippy::ptr_arg)]
pub fn serialize_money_vec<S: Serializer>(values: &Vec<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    let rounded: Vec<f64> = values.iter().map(|v| round2(*v)).collect();
    rounded.serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_conversions() {
        assert!((to_monthly(100.0) - 433.0).abs() < 1e-9);
        assert!((to_daily(70.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn inflation_uses_named_basis() {
        let factors = InflationFactors::default();
        assert_eq!(factors.factor(CpiBasis::Food), FOOD_CPI_FACTOR);
        assert_eq!(factors.factor(CpiBasis::General), GENERAL_CPI_FACTOR);
        assert!((adjust_for_inflation(100.0, factors.factor(CpiBasis::Food)) - 131.0).abs() < 1e-9);
    }

    #[test]
    fn survey_example_monthly_and_per_person() {
        // 144.40/week at a 1.36 factor over a 1.8-person household.
        let monthly = to_monthly(adjust_for_inflation(144.40, GENERAL_CPI_FACTOR));
        assert!((monthly - 850.34).abs() < 0.01, "monthly={monthly}");
        assert!((monthly - 849.99).abs() < 0.5);
        let per_person = monthly / 1.8;
        assert!((per_person - 472.41).abs() < 0.01, "per_person={per_person}");
        assert!((per_person - 472.22).abs() < 0.5);
    }

    #[test]
    fn describe_factor() {
        let factors = InflationFactors::default();
        assert_eq!(
            factors.describe(CpiBasis::Food, "2016", "2025"),
            "31% increase (2016 to 2025)"
        );
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round2(1030.361111), 1030.36);
        assert_eq!(round0(477.6), 478.0);
        let json = serde_json::to_string(&Wrapper { v: 1.23456 }).unwrap();
        assert_eq!(json, r#"{"v":1.23}"#);
    }

    #[derive(Serialize)]
    struct Wrapper {
        #[serde(serialize_with = "serialize_money")]
        v: f64,
    }
}
