//! Survey table records and their derived forms.
//!
//! Base amounts are weekly figures in the survey's reference year. Derived
//! rows carry the same figures converted to monthly amounts in the target
//! year. Field renames keep the dashboard's existing JSON keys.

use serde::{Serialize, Serializer};

use crate::math::units::{round2, serialize_money, serialize_money_opt};

/// Which breakdown a survey table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    IncomeQuintile,
    HouseholdType,
    Segment,
}

impl TableKind {
    pub fn display_name(self) -> &'static str {
        match self {
            TableKind::IncomeQuintile => "Income quintile",
            TableKind::HouseholdType => "Household type",
            TableKind::Segment => "Segment",
        }
    }
}

/// One row of a static survey table.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyEntry {
    pub label: String,
    /// Weekly spending in reference-year dollars.
    pub weekly_base: f64,
    /// Average persons per household; `None` where the table does not publish it.
    pub persons: Option<f64>,
    pub income_range: Option<String>,
    pub characteristics: Option<String>,
    /// Quintile band a segment typically falls in (e.g. `Quintile 1-2`).
    pub quintile_band: Option<String>,
    /// Share of income spent on groceries as published with the survey (percent).
    pub reported_income_share_pct: Option<f64>,
    pub note: Option<String>,
}

impl SurveyEntry {
    pub fn new(label: impl Into<String>, weekly_base: f64) -> Self {
        Self {
            label: label.into(),
            weekly_base,
            persons: None,
            income_range: None,
            characteristics: None,
            quintile_band: None,
            reported_income_share_pct: None,
            note: None,
        }
    }

    pub fn persons(mut self, persons: f64) -> Self {
        self.persons = Some(persons);
        self
    }

    pub fn income_range(mut self, range: impl Into<String>) -> Self {
        self.income_range = Some(range.into());
        self
    }

    pub fn characteristics(mut self, text: impl Into<String>) -> Self {
        self.characteristics = Some(text.into());
        self
    }

    pub fn quintile_band(mut self, band: impl Into<String>) -> Self {
        self.quintile_band = Some(band.into());
        self
    }

    pub fn reported_share(mut self, pct: f64) -> Self {
        self.reported_income_share_pct = Some(pct);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A survey entry after unit conversion and inflation adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSurveyEntry {
    pub label: String,
    #[serde(rename = "weekly_2016")]
    pub weekly_base: f64,
    #[serde(rename = "weekly_2025", serialize_with = "serialize_money")]
    pub weekly_adjusted: f64,
    #[serde(rename = "monthly_2016", serialize_with = "serialize_money")]
    pub monthly_base: f64,
    #[serde(rename = "monthly_2025", serialize_with = "serialize_money")]
    pub monthly_adjusted: f64,
    #[serde(rename = "daily_2025", serialize_with = "serialize_money")]
    pub daily_adjusted: f64,
    #[serde(rename = "per_person_monthly_2025", serialize_with = "serialize_money_opt")]
    pub per_person_monthly: Option<f64>,
    #[serde(rename = "avg_persons", skip_serializing_if = "Option::is_none")]
    pub persons: Option<f64>,
    /// `monthly_adjusted / (annual income / 12)`, income-quintile rows only.
    #[serde(rename = "proportion_income", serialize_with = "serialize_share_opt")]
    pub income_share: Option<f64>,
    #[serde(rename = "reported_proportion_income", skip_serializing_if = "Option::is_none")]
    pub reported_income_share_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characteristics: Option<String>,
    #[serde(rename = "quintile", skip_serializing_if = "Option::is_none")]
    pub quintile_band: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Ratios serialize as percentages with two decimals.
fn serialize_share_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&round2(v * 100.0)),
        None => serializer.serialize_none(),
    }
}

/// One modeled cell of the household-type × income-quintile matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTabCell {
    pub row_category: String,
    pub column_category: String,
    /// Whole currency units per person per month.
    pub value: f64,
}

/// Caveat attached to every cross-tab output.
pub const CROSS_TAB_NOTE: &str = "Modeled estimate: household-type per-person spending scaled by each \
income quintile's per-person spending relative to the middle quintile. Not direct survey data.";

/// Dense household-type × income-quintile matrix (row-major).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub baseline: String,
    pub cells: Vec<CrossTabCell>,
    pub note: &'static str,
}

impl CrossTab {
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        self.cells.get(r * self.columns.len() + c).map(|cell| cell.value)
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> &[CrossTabCell] {
        let n = self.columns.len();
        let start = (index * n).min(self.cells.len());
        let end = (start + n).min(self.cells.len());
        &self.cells[start..end]
    }
}

/// All derived breakdowns for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub quintile_rows: Vec<DerivedSurveyEntry>,
    pub household_type_rows: Vec<DerivedSurveyEntry>,
    pub segment_rows: Vec<DerivedSurveyEntry>,
    pub cross_tab: CrossTab,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_metadata() {
        let entry = SurveyEntry::new("One person", 89.0)
            .persons(1.0)
            .note("Living alone");
        assert_eq!(entry.persons, Some(1.0));
        assert_eq!(entry.note.as_deref(), Some("Living alone"));
        assert!(entry.income_range.is_none());
    }

    #[test]
    fn share_serializes_as_percent() {
        let row = DerivedSurveyEntry {
            label: "Q".into(),
            weekly_base: 100.0,
            weekly_adjusted: 131.0,
            monthly_base: 433.0,
            monthly_adjusted: 567.23,
            daily_adjusted: 18.714,
            per_person_monthly: None,
            persons: None,
            income_share: Some(0.12341),
            reported_income_share_pct: None,
            income_range: None,
            characteristics: None,
            quintile_band: None,
            note: None,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["proportion_income"], 12.34);
        assert_eq!(json["daily_2025"], 18.71);
        assert!(json["per_person_monthly_2025"].is_null());
        assert!(json.get("avg_persons").is_none());
    }
}
