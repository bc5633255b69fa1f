//! Dashboard projections of the enriched series.
//!
//! - `summarize`: headline figures (latest, trailing 12, YTD, YoY)
//! - `chart_window`: the last `n` points as parallel arrays
//!
//! Preconditions that cannot be met (too few points, no data in the YTD
//! year) produce `None`, never zero.

use crate::domain::{ChartWindow, SummaryStats};
use crate::estimate::{EnrichedSeries, ROLLING_WINDOW};
use crate::math::rolling::mean;

pub mod format;

pub use format::*;

/// Periods between an observation and the same month a year earlier.
pub const YOY_LAG: usize = 12;

pub fn summarize(series: &EnrichedSeries, ytd_year: i32) -> SummaryStats {
    let points = series.points();
    let latest = series.latest();
    let per_household: Vec<f64> = points.iter().map(|p| p.per_household).collect();

    let rolling_12m = if per_household.len() >= ROLLING_WINDOW {
        mean(&per_household[per_household.len() - ROLLING_WINDOW..])
    } else {
        None
    };

    let ytd: Vec<f64> = points
        .iter()
        .filter(|p| p.point.period.year() == ytd_year)
        .map(|p| p.per_household)
        .collect();

    SummaryStats {
        latest_month: latest.point.period,
        latest_value: latest.per_household,
        latest_national: latest.point.value,
        households: latest.households,
        rolling_12m,
        ytd_year,
        ytd_avg: mean(&ytd),
        yoy_growth: yoy_growth(&per_household),
        data_source: series.source(),
        total_months: points.len(),
    }
}

/// `(v[last] / v[last - 12] - 1) * 100`, when a point 12 periods back exists.
///
/// Needs 13 points: with exactly 12 the oldest month is only 11 periods
/// before the latest, so there is no same-month-last-year value and the
/// result is `None`.
pub fn yoy_growth(values: &[f64]) -> Option<f64> {
    let last = values.len().checked_sub(1)?;
    let previous = values[last.checked_sub(YOY_LAG)?];
    if previous == 0.0 {
        return None;
    }
    Some((values[last] / previous - 1.0) * 100.0)
}

pub fn chart_window(series: &EnrichedSeries, n: usize) -> ChartWindow {
    let points = series.points();
    let tail = &points[points.len().saturating_sub(n)..];

    ChartWindow {
        labels: tail.iter().map(|p| p.point.period).collect(),
        values: tail.iter().map(|p| p.per_household).collect(),
        rolling_avg: tail.iter().map(|p| p.rolling_mean).collect(),
        national_spending: tail.iter().map(|p| p.point.value).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{PopulationTable, manual_series};
    use crate::domain::{ObservationPoint, Period, SeriesRecord, SourceTag};
    use crate::estimate::enrich;

    fn manual_enriched() -> EnrichedSeries {
        enrich(&manual_series(), &PopulationTable::australia().unwrap())
    }

    fn short_series(n: usize) -> EnrichedSeries {
        let points = (0..n)
            .map(|i| ObservationPoint {
                period: Period::new(2024, i as u32 + 1).unwrap(),
                value: 10_000.0 + i as f64,
            })
            .collect();
        let series = SeriesRecord::new(points, SourceTag::Api).unwrap();
        enrich(&series, &PopulationTable::australia().unwrap())
    }

    #[test]
    fn summary_of_manual_series() {
        let series = manual_enriched();
        let stats = summarize(&series, 2025);
        let v: Vec<f64> = series.points().iter().map(|p| p.per_household).collect();

        assert_eq!(stats.latest_month.to_string(), "2025-11");
        assert_eq!(stats.latest_national, 12292.4);
        assert_eq!(stats.households, 11_000_000);
        assert_eq!(stats.total_months, 23);
        assert_eq!(stats.data_source, SourceTag::Manual);
        assert_eq!(stats.latest_value, v[22]);

        let expected_yoy = (v[22] / v[10] - 1.0) * 100.0;
        assert_eq!(stats.yoy_growth, Some(expected_yoy));

        let expected_12m = v[11..].iter().sum::<f64>() / 12.0;
        assert!((stats.rolling_12m.unwrap() - expected_12m).abs() < 1e-9);

        let expected_ytd = v[12..].iter().sum::<f64>() / 11.0;
        assert!((stats.ytd_avg.unwrap() - expected_ytd).abs() < 1e-9);
    }

    #[test]
    fn short_series_has_no_yoy_or_rolling() {
        let stats = summarize(&short_series(11), 2024);
        assert_eq!(stats.yoy_growth, None);
        assert_eq!(stats.rolling_12m, None);
        assert!(stats.ytd_avg.is_some());

        // Twelve points: trailing mean exists but nothing is 12 periods back.
        let stats = summarize(&short_series(12), 2024);
        assert!(stats.rolling_12m.is_some());
        assert_eq!(stats.yoy_growth, None);
    }

    #[test]
    fn ytd_without_points_is_none() {
        let stats = summarize(&manual_enriched(), 2019);
        assert_eq!(stats.ytd_avg, None);
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["ytd_avg"].is_null());
        assert_eq!(json["ytd_year"], 2019);
    }

    #[test]
    fn yoy_growth_formula() {
        let mut values = vec![100.0; 13];
        values[12] = 110.0;
        let growth = yoy_growth(&values).unwrap();
        assert!((growth - 10.0).abs() < 1e-9);
        assert_eq!(yoy_growth(&[]), None);
        assert_eq!(yoy_growth(&values[..12]), None);
    }

    #[test]
    fn chart_window_is_aligned() {
        let series = manual_enriched();
        let window = chart_window(&series, 6);
        assert_eq!(window.len(), 6);
        assert_eq!(window.values.len(), 6);
        assert_eq!(window.rolling_avg.len(), 6);
        assert_eq!(window.national_spending.len(), 6);
        assert_eq!(window.labels[0].to_string(), "2025-06");
        assert_eq!(window.national_spending[5], 12292.4);
        assert_eq!(window.rolling_avg[5], series.latest().rolling_mean);
    }

    #[test]
    fn chart_window_larger_than_series_returns_everything() {
        let series = manual_enriched();
        let window = chart_window(&series, 24);
        assert_eq!(window.len(), 23);
        assert_eq!(window.labels[0].to_string(), "2024-01");
        assert!(chart_window(&series, 0).is_empty());
    }
}
