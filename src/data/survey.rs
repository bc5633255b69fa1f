//! Static Household Expenditure Survey tables.
//!
//! Source: ABS 6530.0 Household Expenditure Survey, Australia: Summary of
//! Results, 2015-16. All amounts are weekly grocery spending in 2015-16
//! dollars. Tables are validated once when built; derivations assume every
//! persons divisor is positive.

use crate::domain::{SurveyEntry, TableKind};
use crate::error::AppError;

/// Survey reference period, as published.
pub const SURVEY_YEAR: &str = "2015-16";

/// Year the derived figures are expressed in.
pub const TARGET_YEAR: i32 = 2025;

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyTable {
    pub kind: TableKind,
    pub citation: String,
    pub entries: Vec<SurveyEntry>,
}

impl SurveyTable {
    pub fn new(kind: TableKind, citation: impl Into<String>, entries: Vec<SurveyEntry>) -> Result<Self, AppError> {
        let citation = citation.into();
        if entries.is_empty() {
            return Err(AppError::config(format!(
                "{} table '{citation}' has no rows.",
                kind.display_name()
            )));
        }
        for entry in &entries {
            if !(entry.weekly_base.is_finite() && entry.weekly_base > 0.0) {
                return Err(AppError::config(format!(
                    "Survey row '{}' has a non-positive weekly amount.",
                    entry.label
                )));
            }
            match entry.persons {
                Some(p) if !(p.is_finite() && p > 0.0) => {
                    return Err(AppError::config(format!(
                        "Survey row '{}' has a non-positive persons divisor.",
                        entry.label
                    )));
                }
                None if kind != TableKind::Segment => {
                    return Err(AppError::config(format!(
                        "Survey row '{}' is missing its persons divisor.",
                        entry.label
                    )));
                }
                _ => {}
            }
        }
        Ok(Self { kind, citation, entries })
    }

    pub fn find(&self, label: &str) -> Option<&SurveyEntry> {
        self.entries.iter().find(|e| e.label == label)
    }
}

/// The three survey breakdowns plus the designated baseline quintile.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyTables {
    pub survey_year: String,
    pub target_year: i32,
    pub quintiles: SurveyTable,
    pub household_types: SurveyTable,
    pub segments: SurveyTable,
    baseline_quintile: usize,
}

impl SurveyTables {
    pub fn new(
        quintiles: SurveyTable,
        household_types: SurveyTable,
        segments: SurveyTable,
        baseline_label: &str,
    ) -> Result<Self, AppError> {
        let baseline_quintile = quintiles
            .entries
            .iter()
            .position(|e| e.label == baseline_label)
            .ok_or_else(|| AppError::config(format!("Baseline quintile '{baseline_label}' is not in the table.")))?;

        Ok(Self {
            survey_year: SURVEY_YEAR.to_string(),
            target_year: TARGET_YEAR,
            quintiles,
            household_types,
            segments,
            baseline_quintile,
        })
    }

    pub fn baseline_quintile(&self) -> &SurveyEntry {
        &self.quintiles.entries[self.baseline_quintile]
    }

    pub fn baseline_index(&self) -> usize {
        self.baseline_quintile
    }

    /// The 2015-16 tables used by the dashboard.
    pub fn hes_2015_16() -> Result<Self, AppError> {
        let quintiles = SurveyTable::new(
            TableKind::IncomeQuintile,
            "HES 2015-16 Table 3.3; household sizes from Table 2.1",
            vec![
                SurveyEntry::new("Quintile 1 (Lowest 20%)", 159.0)
                    .persons(1.8)
                    .income_range("Under $52,000")
                    .characteristics("Age pension, JobSeeker, DSP recipients, single income")
                    .reported_share(18.5),
                SurveyEntry::new("Quintile 2 (Low-Middle 20%)", 188.0)
                    .persons(2.2)
                    .income_range("$52,000 - $83,000")
                    .characteristics("Part-time work, single income families, some DSP + work")
                    .reported_share(14.2),
                SurveyEntry::new("Quintile 3 (Middle 20%)", 219.0)
                    .persons(2.6)
                    .income_range("$83,000 - $117,000")
                    .characteristics("Dual income, median households")
                    .reported_share(11.8),
                SurveyEntry::new("Quintile 4 (Middle-High 20%)", 244.0)
                    .persons(2.9)
                    .income_range("$117,000 - $168,000")
                    .characteristics("Dual income professionals")
                    .reported_share(9.5),
                SurveyEntry::new("Quintile 5 (Highest 20%)", 289.0)
                    .persons(3.1)
                    .income_range("Over $168,000")
                    .characteristics("High-income professionals, dual high earners")
                    .reported_share(7.3),
            ],
        )?;

        let household_types = SurveyTable::new(
            TableKind::HouseholdType,
            "HES 2015-16 Table 3.4",
            vec![
                SurveyEntry::new("One person", 89.0)
                    .persons(1.0)
                    .note("Living alone, often retirees or young singles"),
                SurveyEntry::new("Couple only", 178.0)
                    .persons(2.0)
                    .note("No dependent children, often retirees or young couples"),
                SurveyEntry::new("Couple with children", 278.0)
                    .persons(4.1)
                    .note("Dependent children under 15 or students"),
                SurveyEntry::new("One parent with children", 147.0)
                    .persons(2.8)
                    .note("Single parent with dependent children"),
                SurveyEntry::new("Other household", 198.0)
                    .persons(3.2)
                    .note("Multi-generational, group households, etc."),
            ],
        )?;

        let segments = SurveyTable::new(
            TableKind::Segment,
            "DSS Payment Demographics & HES cross-tabulation",
            vec![
                SurveyEntry::new("DSP Only (No Work)", 142.0)
                    .income_range("$25,000 - $35,000")
                    .quintile_band("Quintile 1")
                    .note("Disability Support Pension recipients, no employment income"),
                SurveyEntry::new("DSP + Part-time Work", 168.0)
                    .income_range("$35,000 - $55,000")
                    .quintile_band("Quintile 1-2")
                    .note("DSP recipients with part-time employment (under $100/week)"),
                SurveyEntry::new("NDIS Participant + Carer", 195.0)
                    .income_range("$45,000 - $70,000")
                    .quintile_band("Quintile 2")
                    .note("NDIS participant household with carer pension/payment"),
                SurveyEntry::new("Working Low Income + NDIS", 215.0)
                    .income_range("$60,000 - $85,000")
                    .quintile_band("Quintile 2-3")
                    .note("NDIS participant household with full-time minimum wage income"),
            ],
        )?;

        Self::new(quintiles, household_types, segments, "Quintile 3 (Middle 20%)")
    }
}

/// `Quintile 3 (Middle 20%)` -> `Quintile 3`.
pub fn short_label(label: &str) -> &str {
    match label.find(" (") {
        Some(idx) => &label[..idx],
        None => label,
    }
}
