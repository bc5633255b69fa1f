//! Distribution summaries and chart series for the dashboard.

use serde::{Serialize, Serializer};

use crate::data::SurveyTables;
use crate::domain::{DerivedSurveyEntry, Distribution};
use crate::math::units::{CpiBasis, InflationFactors, round2, serialize_money, serialize_money_opt, serialize_money_vec};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuintileRange {
    #[serde(serialize_with = "serialize_money")]
    pub lowest: f64,
    #[serde(serialize_with = "serialize_money")]
    pub highest: f64,
    #[serde(serialize_with = "serialize_money")]
    pub difference: f64,
    #[serde(serialize_with = "serialize_money")]
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdRange {
    #[serde(serialize_with = "serialize_money")]
    pub lowest: f64,
    #[serde(serialize_with = "serialize_money")]
    pub highest: f64,
    #[serde(serialize_with = "serialize_money")]
    pub per_person_lowest: f64,
    #[serde(serialize_with = "serialize_money")]
    pub per_person_highest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedFigure {
    pub label: String,
    #[serde(serialize_with = "serialize_money")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRange {
    #[serde(serialize_with = "serialize_money")]
    pub lowest: f64,
    #[serde(serialize_with = "serialize_money")]
    pub highest: f64,
    /// `None` only for an empty segment table.
    pub lowest_segment: Option<NamedFigure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub quintile_range: QuintileRange,
    pub household_range: HouseholdRange,
    pub segment_range: SegmentRange,
    pub data_source: String,
    pub cpi_adjustment: String,
    pub data_year: String,
    pub adjusted_year: String,
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn lowest_row(rows: &[DerivedSurveyEntry]) -> Option<&DerivedSurveyEntry> {
    rows.iter()
        .min_by(|a, b| a.monthly_adjusted.total_cmp(&b.monthly_adjusted))
}

pub fn distribution_summary(dist: &Distribution, tables: &SurveyTables, factors: &InflationFactors) -> DistributionSummary {
    let (q_lo, q_hi) = min_max(dist.quintile_rows.iter().map(|r| r.monthly_adjusted));
    let (h_lo, h_hi) = min_max(dist.household_type_rows.iter().map(|r| r.monthly_adjusted));
    let (pp_lo, pp_hi) = min_max(dist.household_type_rows.iter().filter_map(|r| r.per_person_monthly));
    let (s_lo, s_hi) = min_max(dist.segment_rows.iter().map(|r| r.monthly_adjusted));

    let lowest_segment = lowest_row(&dist.segment_rows).map(|r| NamedFigure {
        label: r.label.clone(),
        value: r.monthly_adjusted,
    });

    let base_year = tables.survey_year.split('-').next().unwrap_or(tables.survey_year.as_str());
    // `2015-16` is the financial year ending in 2016.
    let base_end_year = base_year
        .parse::<i32>()
        .map(|y| (y + 1).to_string())
        .unwrap_or_else(|_| tables.survey_year.clone());

    DistributionSummary {
        quintile_range: QuintileRange {
            lowest: q_lo,
            highest: q_hi,
            difference: q_hi - q_lo,
            ratio: q_hi / q_lo,
        },
        household_range: HouseholdRange {
            lowest: h_lo,
            highest: h_hi,
            per_person_lowest: pp_lo,
            per_person_highest: pp_hi,
        },
        segment_range: SegmentRange {
            lowest: s_lo,
            highest: s_hi,
            lowest_segment,
        },
        data_source: format!("ABS HES {}", tables.survey_year),
        cpi_adjustment: factors.describe(CpiBasis::Food, &base_end_year, &tables.target_year.to_string()),
        data_year: tables.survey_year.clone(),
        adjusted_year: tables.target_year.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerPersonByIncome {
    #[serde(serialize_with = "serialize_money_opt")]
    pub lowest: Option<f64>,
    #[serde(serialize_with = "serialize_money_opt")]
    pub middle: Option<f64>,
    #[serde(serialize_with = "serialize_money_opt")]
    pub highest: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerPersonByHousehold {
    #[serde(serialize_with = "serialize_money_opt")]
    pub single: Option<f64>,
    #[serde(serialize_with = "serialize_money_opt")]
    pub couple: Option<f64>,
    #[serde(serialize_with = "serialize_money_opt")]
    pub family: Option<f64>,
    #[serde(serialize_with = "serialize_money_opt")]
    pub single_parent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomiesOfScale {
    #[serde(serialize_with = "serialize_money")]
    pub living_alone: f64,
    #[serde(serialize_with = "serialize_money")]
    pub family: f64,
    /// Per-person saving of a family over living alone (percent).
    #[serde(serialize_with = "serialize_pct1")]
    pub savings_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerPersonSummary {
    pub per_person_by_income: PerPersonByIncome,
    pub per_person_by_household: PerPersonByHousehold,
    pub economies_of_scale: Option<EconomiesOfScale>,
}

fn serialize_pct1<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10.0).round() / 10.0)
}

fn per_person_of(rows: &[DerivedSurveyEntry], label: &str) -> Option<f64> {
    rows.iter()
        .find(|r| r.label == label)
        .and_then(|r| r.per_person_monthly)
}

pub fn per_person_summary(dist: &Distribution, tables: &SurveyTables) -> PerPersonSummary {
    let q = &dist.quintile_rows;
    let pp = |row: Option<&DerivedSurveyEntry>| row.and_then(|r| r.per_person_monthly);

    let hh = &dist.household_type_rows;
    let single = per_person_of(hh, "One person");
    let family = per_person_of(hh, "Couple with children");

    let economies_of_scale = match (single, family) {
        (Some(single), Some(family)) if single > 0.0 => Some(EconomiesOfScale {
            living_alone: single,
            family,
            savings_pct: (1.0 - family / single) * 100.0,
        }),
        _ => None,
    };

    PerPersonSummary {
        per_person_by_income: PerPersonByIncome {
            lowest: pp(q.first()),
            middle: pp(q.get(tables.baseline_index())),
            highest: pp(q.last()),
        },
        per_person_by_household: PerPersonByHousehold {
            single,
            couple: per_person_of(hh, "Couple only"),
            family,
            single_parent: per_person_of(hh, "One parent with children"),
        },
        economies_of_scale,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuintileChart {
    pub labels: Vec<String>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub monthly_2025: Vec<f64>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub monthly_2016: Vec<f64>,
    /// Percent of income; `null` where no reference income exists.
    pub proportion_income: Vec<Option<f64>>,
    pub income_ranges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdChart {
    pub labels: Vec<String>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub monthly_2025: Vec<f64>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub per_person_2025: Vec<f64>,
    pub avg_persons: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentChart {
    pub labels: Vec<String>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub monthly_2025: Vec<f64>,
    pub income_ranges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerPersonComparison {
    pub labels: Vec<String>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub per_household: Vec<f64>,
    #[serde(serialize_with = "serialize_money_vec")]
    pub per_person: Vec<f64>,
    pub household_sizes: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerPersonCharts {
    pub quintile_comparison: PerPersonComparison,
    pub household_type_comparison: PerPersonComparison,
}

fn labels(rows: &[DerivedSurveyEntry]) -> Vec<String> {
    rows.iter().map(|r| r.label.clone()).collect()
}

fn income_ranges(rows: &[DerivedSurveyEntry]) -> Vec<String> {
    rows.iter().map(|r| r.income_range.clone().unwrap_or_default()).collect()
}

pub fn chart_quintiles(dist: &Distribution) -> QuintileChart {
    let rows = &dist.quintile_rows;
    QuintileChart {
        labels: labels(rows),
        monthly_2025: rows.iter().map(|r| r.monthly_adjusted).collect(),
        monthly_2016: rows.iter().map(|r| r.monthly_base).collect(),
        proportion_income: rows.iter().map(|r| r.income_share.map(|s| round2(s * 100.0))).collect(),
        income_ranges: income_ranges(rows),
    }
}

pub fn chart_household_types(dist: &Distribution) -> HouseholdChart {
    let rows = &dist.household_type_rows;
    HouseholdChart {
        labels: labels(rows),
        monthly_2025: rows.iter().map(|r| r.monthly_adjusted).collect(),
        per_person_2025: rows.iter().map(|r| r.per_person_monthly.unwrap_or(r.monthly_adjusted)).collect(),
        avg_persons: rows.iter().map(|r| r.persons.unwrap_or(1.0)).collect(),
    }
}

pub fn chart_segments(dist: &Distribution) -> SegmentChart {
    let rows = &dist.segment_rows;
    SegmentChart {
        labels: labels(rows),
        monthly_2025: rows.iter().map(|r| r.monthly_adjusted).collect(),
        income_ranges: income_ranges(rows),
    }
}

fn comparison(rows: &[DerivedSurveyEntry]) -> PerPersonComparison {
    PerPersonComparison {
        labels: labels(rows),
        per_household: rows.iter().map(|r| r.monthly_adjusted).collect(),
        per_person: rows.iter().map(|r| r.per_person_monthly.unwrap_or(r.monthly_adjusted)).collect(),
        household_sizes: rows.iter().map(|r| r.persons.unwrap_or(1.0)).collect(),
    }
}

pub fn chart_per_person(dist: &Distribution) -> PerPersonCharts {
    PerPersonCharts {
        quintile_comparison: comparison(&dist.quintile_rows),
        household_type_comparison: comparison(&dist.household_type_rows),
    }
}
