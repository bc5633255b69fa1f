//! Survey tables -> derived rows and the modeled cross-tabulation.
//!
//! Spending amounts are lifted with the food CPI basis; reference incomes with
//! the all-groups basis. All figures stay unrounded here.

use tracing::debug;

use crate::data::survey::short_label;
use crate::data::{IncomeTable, SurveyTable, SurveyTables};
use crate::domain::{CROSS_TAB_NOTE, CrossTab, CrossTabCell, DerivedSurveyEntry, Distribution, SurveyEntry, TableKind};
use crate::math::units::{CpiBasis, InflationFactors, adjust_for_inflation, round0, to_daily, to_monthly};

/// Derive one survey row.
///
/// `annual_income` is the household's annual income in target-year dollars;
/// pass `None` for rows without an income denominator.
pub fn derive_entry(entry: &SurveyEntry, factors: &InflationFactors, annual_income: Option<f64>) -> DerivedSurveyEntry {
    let weekly_adjusted = adjust_for_inflation(entry.weekly_base, factors.factor(CpiBasis::Food));
    let monthly_adjusted = to_monthly(weekly_adjusted);
    let per_person_monthly = entry.persons.map(|p| monthly_adjusted / p);
    let income_share = annual_income
        .filter(|income| *income > 0.0)
        .map(|income| monthly_adjusted / (income / 12.0));

    DerivedSurveyEntry {
        label: entry.label.clone(),
        weekly_base: entry.weekly_base,
        weekly_adjusted,
        monthly_base: to_monthly(entry.weekly_base),
        monthly_adjusted,
        daily_adjusted: to_daily(weekly_adjusted),
        per_person_monthly,
        persons: entry.persons,
        income_share,
        reported_income_share_pct: entry.reported_income_share_pct,
        income_range: entry.income_range.clone(),
        characteristics: entry.characteristics.clone(),
        quintile_band: entry.quintile_band.clone(),
        note: entry.note.clone(),
    }
}

fn derive_table(table: &SurveyTable, factors: &InflationFactors, income: Option<&IncomeTable>) -> Vec<DerivedSurveyEntry> {
    table
        .entries
        .iter()
        .map(|entry| {
            let annual = match (table.kind, income) {
                (TableKind::IncomeQuintile, Some(income)) => {
                    let annual = income.annual_income(&entry.label);
                    if annual.is_none() {
                        debug!(label = %entry.label, "no reference income for quintile");
                    }
                    annual.map(|a| adjust_for_inflation(a, factors.factor(CpiBasis::General)))
                }
                _ => None,
            };
            derive_entry(entry, factors, annual)
        })
        .collect()
}

/// Derive every table and the household-type × quintile matrix.
pub fn derive_all(tables: &SurveyTables, income: &IncomeTable, factors: &InflationFactors) -> Distribution {
    let quintile_rows = derive_table(&tables.quintiles, factors, Some(income));
    let household_type_rows = derive_table(&tables.household_types, factors, None);
    let segment_rows = derive_table(&tables.segments, factors, None);
    let cross_tab = cross_tab(&household_type_rows, &quintile_rows, &quintile_rows[tables.baseline_index()]);

    Distribution {
        quintile_rows,
        household_type_rows,
        segment_rows,
        cross_tab,
    }
}

/// Household-type and quintile rows always carry a persons divisor.
fn per_person(row: &DerivedSurveyEntry) -> f64 {
    row.per_person_monthly.unwrap_or(row.monthly_adjusted)
}

/// `cell = round(household.per_person × quintile.per_person / baseline.per_person)`.
///
/// `baseline` is normally one of `quintile_rows`; its column is then the
/// household row's own per-person value.
pub fn cross_tab(
    household_rows: &[DerivedSurveyEntry],
    quintile_rows: &[DerivedSurveyEntry],
    baseline: &DerivedSurveyEntry,
) -> CrossTab {
    let baseline_pp = per_person(baseline);

    let mut cells = Vec::with_capacity(household_rows.len() * quintile_rows.len());
    for row in household_rows {
        let row_pp = per_person(row);
        for column in quintile_rows {
            let factor = per_person(column) / baseline_pp;
            cells.push(CrossTabCell {
                row_category: row.label.clone(),
                column_category: short_label(&column.label).to_string(),
                value: round0(row_pp * factor),
            });
        }
    }

    CrossTab {
        rows: household_rows.iter().map(|r| r.label.clone()).collect(),
        columns: quintile_rows.iter().map(|q| short_label(&q.label).to_string()).collect(),
        baseline: short_label(&baseline.label).to_string(),
        cells,
        note: CROSS_TAB_NOTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::units::round2;

    fn distribution() -> Distribution {
        derive_all(
            &SurveyTables::hes_2015_16().unwrap(),
            &IncomeTable::hes_2015_16().unwrap(),
            &InflationFactors::default(),
        )
    }

    #[test]
    fn derive_entry_example() {
        let entry = SurveyEntry::new("Example", 144.40).persons(1.8);
        let factors = InflationFactors { general: 1.36, food: 1.36 };
        let row = derive_entry(&entry, &factors, None);
        assert!((row.monthly_adjusted - 144.40 * 1.36 * 4.33).abs() < 1e-9);
        assert!((row.per_person_monthly.unwrap() - row.monthly_adjusted / 1.8).abs() < 1e-9);
        assert_eq!(round2(row.per_person_monthly.unwrap()), 472.41);
        assert_eq!(row.income_share, None);
    }

    #[test]
    fn quintile_rows_use_food_cpi() {
        let dist = distribution();
        let q1 = &dist.quintile_rows[0];
        assert_eq!(q1.weekly_base, 159.0);
        assert!((q1.weekly_adjusted - 208.29).abs() < 1e-9);
        assert_eq!(round2(q1.monthly_adjusted), 901.9);
        assert_eq!(round2(q1.monthly_base), 688.47);
        assert_eq!(round2(q1.per_person_monthly.unwrap()), 501.05);
    }

    #[test]
    fn income_share_only_for_quintiles() {
        let dist = distribution();
        for row in &dist.quintile_rows {
            let share = row.income_share.unwrap();
            assert!(share > 0.0 && share < 1.0, "{}: {share}", row.label);
        }
        let q1 = &dist.quintile_rows[0];
        let expected = q1.monthly_adjusted / (44_700.0 * 1.36 / 12.0);
        assert!((q1.income_share.unwrap() - expected).abs() < 1e-12);

        assert!(dist.household_type_rows.iter().all(|r| r.income_share.is_none()));
        assert!(dist.segment_rows.iter().all(|r| r.income_share.is_none()));
        assert!(dist.segment_rows.iter().all(|r| r.per_person_monthly.is_none()));
    }

    #[test]
    fn income_share_falls_with_income() {
        let dist = distribution();
        let shares: Vec<f64> = dist.quintile_rows.iter().map(|r| r.income_share.unwrap()).collect();
        assert!(shares.windows(2).all(|w| w[0] > w[1]), "{shares:?}");
    }

    #[test]
    fn cross_tab_is_dense_and_baseline_is_unscaled() {
        let dist = distribution();
        let ct = &dist.cross_tab;
        assert_eq!(ct.rows.len(), 5);
        assert_eq!(ct.columns, vec!["Quintile 1", "Quintile 2", "Quintile 3", "Quintile 4", "Quintile 5"]);
        assert_eq!(ct.cells.len(), 25);
        assert_eq!(ct.baseline, "Quintile 3");
        assert!(ct.note.contains("Modeled estimate"));

        for row in &dist.household_type_rows {
            let cell = ct.get(&row.label, "Quintile 3").unwrap();
            assert_eq!(cell, row.per_person_monthly.unwrap().round());
        }
        assert_eq!(ct.get("One person", "Quintile 3"), Some(505.0));
    }

    #[test]
    fn cross_tab_scales_by_quintile_factor() {
        let dist = distribution();
        let q = &dist.quintile_rows;
        let family = &dist.household_type_rows[2];
        let factor = q[0].per_person_monthly.unwrap() / q[2].per_person_monthly.unwrap();
        let expected = (family.per_person_monthly.unwrap() * factor).round();
        assert_eq!(dist.cross_tab.get("Couple with children", "Quintile 1"), Some(expected));
        assert_eq!(dist.cross_tab.row(2).len(), 5);
        assert_eq!(dist.cross_tab.row(2)[0].value, expected);
    }

    #[test]
    fn cross_tab_takes_any_baseline_row() {
        let dist = distribution();
        let q = &dist.quintile_rows;
        let ct = cross_tab(&dist.household_type_rows, q, &q[0]);
        assert_eq!(ct.baseline, "Quintile 1");
        assert_eq!(ct.cells.len(), 25);
        let single = dist.household_type_rows[0].per_person_monthly.unwrap();
        assert_eq!(ct.get("One person", "Quintile 1"), Some(single.round()));

        let empty = cross_tab(&[], q, &q[2]);
        assert!(empty.rows.is_empty() && empty.cells.is_empty());
        assert_eq!(empty.columns.len(), 5);
    }
}
