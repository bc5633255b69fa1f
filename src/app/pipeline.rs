//! Shared workflow used by every subcommand.
//!
//! Series: source (remote or manual) -> enrich -> summary + chart window
//! Distribution: survey tables -> derived rows -> summaries + chart series + cross-tab
//!
//! Subcommands then only decide how to present the results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::data::{
    IncomeTable, ManualSource, PopulationTable, RemoteSource, SourceConfig, SurveyTables, load_with_fallback,
};
use crate::distribution::{
    DistributionSummary, HouseholdChart, PerPersonCharts, PerPersonSummary, QuintileChart, SegmentChart,
    chart_household_types, chart_per_person, chart_quintiles, chart_segments, derive_all, distribution_summary,
    per_person_summary,
};
use crate::domain::{ChartWindow, CrossTab, Distribution, SeriesRecord, SummaryStats};
use crate::error::AppError;
use crate::estimate::{EnrichedSeries, enrich};
use crate::math::units::InflationFactors;
use crate::report::{chart_window, summarize};

/// Reference tables, validated once at startup.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub population: PopulationTable,
    pub income: IncomeTable,
    pub survey: SurveyTables,
    pub factors: InflationFactors,
}

impl ReferenceData {
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            population: PopulationTable::australia()?,
            income: IncomeTable::hes_2015_16()?,
            survey: SurveyTables::hes_2015_16()?,
            factors: InflationFactors::default(),
        })
    }
}

/// Which series to start from and how much of it to project.
#[derive(Debug, Clone)]
pub struct SeriesOptions {
    pub offline: bool,
    pub months: usize,
    pub ytd_year: Option<i32>,
}

/// All computed outputs of a series run.
#[derive(Debug, Clone)]
pub struct SeriesRun {
    pub series: EnrichedSeries,
    pub summary: SummaryStats,
    pub chart: ChartWindow,
}

/// Load the series (falling back to the manual series) and project it.
pub fn run_series(options: &SeriesOptions, refs: &ReferenceData) -> Result<SeriesRun, AppError> {
    let manual = ManualSource;
    let record = if options.offline {
        info!("offline mode: using manual series");
        manual.series()
    } else {
        let remote = RemoteSource::new(SourceConfig::from_env()?)?;
        load_with_fallback(&remote, &manual)
    };

    Ok(run_series_with_record(&record, options, refs))
}

/// Project an already loaded series.
pub fn run_series_with_record(record: &SeriesRecord, options: &SeriesOptions, refs: &ReferenceData) -> SeriesRun {
    let series = enrich(record, &refs.population);
    let ytd_year = options
        .ytd_year
        .unwrap_or_else(|| series.latest().point.period.year());
    let summary = summarize(&series, ytd_year);
    let chart = chart_window(&series, options.months);

    SeriesRun { series, summary, chart }
}

/// Chart-ready series for the distribution views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionCharts {
    pub quintiles: QuintileChart,
    pub household_types: HouseholdChart,
    pub segments: SegmentChart,
    pub per_person: PerPersonCharts,
}

/// All computed outputs of a distribution run.
#[derive(Debug, Clone)]
pub struct DistributionRun {
    pub distribution: Distribution,
    pub summary: DistributionSummary,
    pub per_person: PerPersonSummary,
    pub charts: DistributionCharts,
}

pub fn run_distribution(refs: &ReferenceData) -> DistributionRun {
    let distribution = derive_all(&refs.survey, &refs.income, &refs.factors);
    let summary = distribution_summary(&distribution, &refs.survey, &refs.factors);
    let per_person = per_person_summary(&distribution, &refs.survey);
    let charts = DistributionCharts {
        quintiles: chart_quintiles(&distribution),
        household_types: chart_household_types(&distribution),
        segments: chart_segments(&distribution),
        per_person: chart_per_person(&distribution),
    };

    DistributionRun {
        distribution,
        summary,
        per_person,
        charts,
    }
}

/// Distribution part of the dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionPayload<'a> {
    pub summary: &'a DistributionSummary,
    pub per_person: &'a PerPersonSummary,
    pub charts: &'a DistributionCharts,
    pub quintiles: &'a [crate::domain::DerivedSurveyEntry],
    pub household_types: &'a [crate::domain::DerivedSurveyEntry],
    pub segments: &'a [crate::domain::DerivedSurveyEntry],
    pub cross_tab: &'a CrossTab,
}

impl<'a> DistributionPayload<'a> {
    pub fn new(run: &'a DistributionRun) -> Self {
        Self {
            summary: &run.summary,
            per_person: &run.per_person,
            charts: &run.charts,
            quintiles: &run.distribution.quintile_rows,
            household_types: &run.distribution.household_type_rows,
            segments: &run.distribution.segment_rows,
            cross_tab: &run.distribution.cross_tab,
        }
    }
}

/// Everything the dashboard reads, in one document.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: &'a SummaryStats,
    pub chart: &'a ChartWindow,
    pub series: &'a EnrichedSeries,
    pub distribution: DistributionPayload<'a>,
}

impl<'a> DashboardPayload<'a> {
    pub fn new(series: &'a SeriesRun, distribution: &'a DistributionRun) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: &series.summary,
            chart: &series.chart,
            series: &series.series,
            distribution: DistributionPayload::new(distribution),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::manual_series;
    use crate::domain::SourceTag;

    fn offline(months: usize, ytd_year: Option<i32>) -> SeriesOptions {
        SeriesOptions {
            offline: true,
            months,
            ytd_year,
        }
    }

    #[test]
    fn offline_series_run() {
        let refs = ReferenceData::load().unwrap();
        let run = run_series(&offline(6, None), &refs).unwrap();
        assert_eq!(run.series.source(), SourceTag::Manual);
        assert_eq!(run.summary.ytd_year, 2025);
        assert_eq!(run.summary.total_months, 23);
        assert_eq!(run.chart.len(), 6);
        assert!(run.summary.ytd_avg.is_some());
    }

    #[test]
    fn explicit_ytd_year_is_used() {
        let refs = ReferenceData::load().unwrap();
        let run = run_series_with_record(&manual_series(), &offline(24, Some(2024)), &refs);
        assert_eq!(run.summary.ytd_year, 2024);
        assert_eq!(run.chart.len(), 23);
    }

    #[test]
    fn dashboard_payload_keys() {
        let refs = ReferenceData::load().unwrap();
        let series = run_series_with_record(&manual_series(), &offline(12, None), &refs);
        let dist = run_distribution(&refs);
        let json = serde_json::to_value(DashboardPayload::new(&series, &dist)).unwrap();

        assert!(json["generated_at"].is_string());
        assert_eq!(json["summary"]["latest_month"], "2025-11");
        assert_eq!(json["summary"]["data_source"], "manual");
        assert_eq!(json["chart"]["labels"].as_array().unwrap().len(), 12);
        assert_eq!(json["series"]["points"][0]["month"], "2024-01");
        assert_eq!(json["distribution"]["cross_tab"]["baseline"], "Quintile 3");
        assert_eq!(json["distribution"]["quintiles"][0]["weekly_2016"], 159.0);
        assert_eq!(json["distribution"]["charts"]["segments"]["labels"].as_array().unwrap().len(), 4);
    }
}
