//! Annual household income by income quintile.
//!
//! Incomes are stated in survey reference-year dollars. The derivation engine
//! lifts them to the target year with the all-groups CPI basis before
//! computing the share of income spent on groceries.

use std::collections::HashMap;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeTable {
    annual: HashMap<String, f64>,
}

impl IncomeTable {
    pub fn new<L: Into<String>>(entries: impl IntoIterator<Item = (L, f64)>) -> Result<Self, AppError> {
        let mut annual = HashMap::new();
        for (label, income) in entries {
            let label = label.into();
            if !(income.is_finite() && income > 0.0) {
                return Err(AppError::config(format!(
                    "Income table has a non-positive income for '{label}'."
                )));
            }
            annual.insert(label, income);
        }
        Ok(Self { annual })
    }

    /// Representative 2015-16 household incomes per quintile.
    ///
    /// Each figure sits inside its published income range and is consistent
    /// with the published grocery share of income for that quintile.
    pub fn hes_2015_16() -> Result<Self, AppError> {
        Self::new([
            ("Quintile 1 (Lowest 20%)", 44_700.0),
            ("Quintile 2 (Low-Middle 20%)", 68_800.0),
            ("Quintile 3 (Middle 20%)", 96_500.0),
            ("Quintile 4 (Middle-High 20%)", 133_600.0),
            ("Quintile 5 (Highest 20%)", 205_900.0),
        ])
    }

    pub fn annual_income(&self, label: &str) -> Option<f64> {
        self.annual.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.annual.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annual.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_quintile_label() {
        let table = IncomeTable::hes_2015_16().unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.annual_income("Quintile 3 (Middle 20%)"), Some(96_500.0));
        assert_eq!(table.annual_income("Quintile 6"), None);
    }

    #[test]
    fn rejects_non_positive_income() {
        assert!(IncomeTable::new([("Q1", 0.0)]).is_err());
        assert!(IncomeTable::new([("Q1", f64::NAN)]).is_err());
    }
}
