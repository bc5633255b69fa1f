//! Shared series types.
//!
//! These are plain immutable values:
//!
//! - produced by the normalizer / manual source (`SeriesRecord`)
//! - enriched by the estimator (`EnrichedObservation`)
//! - projected into dashboard records (`SummaryStats`, `ChartWindow`)
//!
//! Serialized field names follow the dashboard's JSON contract.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::math::units::{serialize_money, serialize_money_opt, serialize_money_vec};

/// A calendar month, ordered chronologically and rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|d| Self {
            year: d.year(),
            month: d.month(),
        })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(pub String);

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid period '{}' (expected YYYY-MM)", self.0)
    }
}

impl std::error::Error for PeriodParseError {}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Exactly `YYYY-MM`; chrono alone would accept `2024-1`.
        let bytes = trimmed.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(PeriodParseError(s.to_string()));
        }
        let date = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map_err(|_| PeriodParseError(s.to_string()))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One monthly observation of national food spending (millions, seasonally adjusted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservationPoint {
    #[serde(rename = "month")]
    pub period: Period,
    #[serde(rename = "food_aud_m_sa")]
    pub value: f64,
}

/// Where a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    Api,
    Manual,
}

impl SourceTag {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceTag::Api => "api",
            SourceTag::Manual => "manual",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a set of points could not become a `SeriesRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    Empty,
    DuplicatePeriod(Period),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::Empty => write!(f, "series has no observations"),
            SeriesError::DuplicatePeriod(p) => write!(f, "duplicate observation for {p}"),
        }
    }
}

impl std::error::Error for SeriesError {}

/// A non-empty series, strictly ascending by period, with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRecord {
    source: SourceTag,
    points: Vec<ObservationPoint>,
}

impl SeriesRecord {
    /// Sort the points and check the series invariants.
    pub fn new(mut points: Vec<ObservationPoint>, source: SourceTag) -> Result<Self, SeriesError> {
        if points.is_empty() {
            return Err(SeriesError::Empty);
        }
        points.sort_by_key(|p| p.period);
        if let Some(w) = points.windows(2).find(|w| w[0].period == w[1].period) {
            return Err(SeriesError::DuplicatePeriod(w[0].period));
        }
        Ok(Self { source, points })
    }

    pub fn source(&self) -> SourceTag {
        self.source
    }

    pub fn points(&self) -> &[ObservationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An observation joined with its population divisor and derived per-household figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnrichedObservation {
    #[serde(flatten)]
    pub point: ObservationPoint,
    pub households: u64,
    /// National spending in whole currency units.
    #[serde(rename = "food_aud_sa")]
    pub national_units: f64,
    #[serde(rename = "food_per_household_month", serialize_with = "serialize_money")]
    pub per_household: f64,
    #[serde(rename = "food_per_hh_12m_avg", serialize_with = "serialize_money")]
    pub rolling_mean: f64,
}

/// Dashboard headline figures for an enriched series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub latest_month: Period,
    #[serde(serialize_with = "serialize_money")]
    pub latest_value: f64,
    pub latest_national: f64,
    pub households: u64,
    #[serde(serialize_with = "serialize_money_opt")]
    pub rolling_12m: Option<f64>,
    pub ytd_year: i32,
    #[serde(serialize_with = "serialize_money_opt")]
    pub ytd_avg: Option<f64>,
    pub yoy_growth: Option<f64>,
    pub data_source: SourceTag,
    pub total_months: usize,
}

/// The trailing `n` points as parallel sequences of equal length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartWindow {
    pub labels: Vec<Period>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub values: Vec<f64>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub rolling_avg: Vec<f64>,
    pub national_spending: Vec<f64>,
}

impl ChartWindow {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(period: &str, value: f64) -> ObservationPoint {
        ObservationPoint {
            period: period.parse().unwrap(),
            value,
        }
    }

    #[test]
    fn period_parses_and_orders() {
        let a: Period = "2024-12".parse().unwrap();
        let b: Period = "2025-01".parse().unwrap();
        assert!(a < b);
        assert_eq!(a.year(), 2024);
        assert_eq!(a.month(), 12);
        assert_eq!(b.to_string(), "2025-01");
    }

    #[test]
    fn period_rejects_bad_labels() {
        for bad in ["2024-13", "2024-1", "2024", "24-01", "2024-01-01", "abcd-ef"] {
            assert!(bad.parse::<Period>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn series_record_sorts_points() {
        let series = SeriesRecord::new(
            vec![point("2024-03", 3.0), point("2024-01", 1.0), point("2024-02", 2.0)],
            SourceTag::Api,
        )
        .unwrap();
        let labels: Vec<String> = series.points().iter().map(|p| p.period.to_string()).collect();
        assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03"]);
    }

    #[test]
    fn series_record_rejects_empty_and_duplicates() {
        assert_eq!(SeriesRecord::new(vec![], SourceTag::Api), Err(SeriesError::Empty));
        let dup = SeriesRecord::new(vec![point("2024-01", 1.0), point("2024-01", 2.0)], SourceTag::Api);
        assert!(matches!(dup, Err(SeriesError::DuplicatePeriod(_))));
    }

    #[test]
    fn observation_serializes_with_dashboard_keys() {
        let json = serde_json::to_value(point("2024-01", 11127.9)).unwrap();
        assert_eq!(json["month"], "2024-01");
        assert_eq!(json["food_aud_m_sa"], 11127.9);
    }
}
