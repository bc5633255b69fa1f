//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the derivation code stays free of presentation rounding
//! - output changes are localized

use crate::distribution::{DistributionSummary, PerPersonSummary};
use crate::domain::{ChartWindow, CrossTab, DerivedSurveyEntry, Distribution, SummaryStats};

/// Headline figures for the per-household series.
pub fn format_summary(stats: &SummaryStats) -> String {
    let mut out = String::new();

    out.push_str("=== Household food spending (per household, monthly) ===\n");
    out.push_str(&format!("Source: {} | months={}\n", stats.data_source, stats.total_months));
    out.push_str(&format!(
        "Latest: {} | ${:.2} per household | national ${:.1}m | households={}\n",
        stats.latest_month, stats.latest_value, stats.latest_national, stats.households
    ));
    out.push_str(&format!("Trailing 12m mean: {}\n", fmt_money_opt(stats.rolling_12m)));
    out.push_str(&format!("YTD {} mean: {}\n", stats.ytd_year, fmt_money_opt(stats.ytd_avg)));
    out.push_str(&format!(
        "YoY growth: {}\n",
        stats
            .yoy_growth
            .map(|g| format!("{g:+.2}%"))
            .unwrap_or_else(|| "n/a".to_string())
    ));

    out
}

/// The chart window as a table (one row per month).
pub fn format_chart_table(window: &ChartWindow) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<8} {:>12} {:>12} {:>14}\n",
        "month", "per_hh", "avg_12m", "national_m"
    ));
    out.push_str(&format!("{:-<8} {:-<12} {:-<12} {:-<14}\n", "", "", "", ""));

    for i in 0..window.len() {
        out.push_str(&format!(
            "{:<8} {:>12.2} {:>12.2} {:>14.1}\n",
            window.labels[i].to_string(),
            window.values[i],
            window.rolling_avg[i],
            window.national_spending[i],
        ));
    }

    out
}

/// Derived survey tables plus their summaries.
pub fn format_distribution(dist: &Distribution, summary: &DistributionSummary, per_person: &PerPersonSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Grocery spending distribution ({}, adjusted to {} dollars: {}) ===\n\n",
        summary.data_source, summary.adjusted_year, summary.cpi_adjustment
    ));

    out.push_str("By income quintile:\n");
    out.push_str(&format_rows(&dist.quintile_rows, true));
    let q = &summary.quintile_range;
    out.push_str(&format!(
        "  range ${:.2} .. ${:.2} (difference ${:.2}, ratio {:.2}x)\n\n",
        q.lowest, q.highest, q.difference, q.ratio
    ));

    out.push_str("By household type:\n");
    out.push_str(&format_rows(&dist.household_type_rows, false));
    let h = &summary.household_range;
    out.push_str(&format!(
        "  household ${:.2} .. ${:.2} | per person ${:.2} .. ${:.2}\n\n",
        h.lowest, h.highest, h.per_person_lowest, h.per_person_highest
    ));

    out.push_str("By segment:\n");
    out.push_str(&format_rows(&dist.segment_rows, false));
    let s = &summary.segment_range;
    out.push_str(&format!(
        "  range ${:.2} .. ${:.2} | lowest: {}\n\n",
        s.lowest,
        s.highest,
        s.lowest_segment
            .as_ref()
            .map(|seg| format!("{} (${:.2})", seg.label, seg.value))
            .unwrap_or_else(|| "n/a".to_string())
    ));

    out.push_str("Per person:\n");
    let inc = &per_person.per_person_by_income;
    out.push_str(&format!(
        "  by income: lowest {} | middle {} | highest {}\n",
        fmt_money_opt(inc.lowest),
        fmt_money_opt(inc.middle),
        fmt_money_opt(inc.highest)
    ));
    let hh = &per_person.per_person_by_household;
    out.push_str(&format!(
        "  by household: single {} | couple {} | family {} | single parent {}\n",
        fmt_money_opt(hh.single),
        fmt_money_opt(hh.couple),
        fmt_money_opt(hh.family),
        fmt_money_opt(hh.single_parent)
    ));
    if let Some(eos) = &per_person.economies_of_scale {
        out.push_str(&format!(
            "  economies of scale: family ${:.2} vs living alone ${:.2} ({:.1}% less per person)\n",
            eos.family, eos.living_alone, eos.savings_pct
        ));
    }

    out
}

fn format_rows(rows: &[DerivedSurveyEntry], with_income: bool) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<30} {:>9} {:>9} {:>10} {:>10} {:>8} {:>8}\n",
            "category", "wk_2016", "wk_2025", "mo_2025", "pp_mo", "persons", if with_income { "income%" } else { "" }
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<30} {:>9.2} {:>9.2} {:>10.2} {:>10} {:>8} {:>8}\n",
                truncate(&r.label, 30),
                r.weekly_base,
                r.weekly_adjusted,
                r.monthly_adjusted,
                r.per_person_monthly.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string()),
                r.persons.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string()),
                if with_income {
                    r.income_share.map(|v| format!("{:.1}", v * 100.0)).unwrap_or_else(|| "-".to_string())
                } else {
                    String::new()
                },
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// The modeled matrix, whole dollars per person per month.
pub fn format_cross_tab(ct: &CrossTab) -> String {
    let mut out = String::new();
    out.push_str("Per-person monthly spending by household type and income quintile\n");

    let mut header = format!("{:<26}", "household type");
    for c in &ct.columns {
        let marker = if *c == ct.baseline { "*" } else { "" };
        header.push_str(&format!(" {:>12}", format!("{c}{marker}")));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (i, row) in ct.rows.iter().enumerate() {
        let mut line = format!("{:<26}", truncate(row, 26));
        for cell in ct.row(i) {
            line.push_str(&format!(" {:>12}", format!("${:.0}", cell.value)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("* baseline quintile\nNote: {}\n", ct.note));
    out
}

fn fmt_money_opt(v: Option<f64>) -> String {
    v.map(|x| format!("${x:.2}")).unwrap_or_else(|| "n/a".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{IncomeTable, PopulationTable, SurveyTables, manual_series};
    use crate::distribution::{derive_all, distribution_summary, per_person_summary};
    use crate::estimate::enrich;
    use crate::math::units::InflationFactors;
    use crate::report::{chart_window, summarize};

    #[test]
    fn summary_mentions_latest_month_and_source() {
        let series = enrich(&manual_series(), &PopulationTable::australia().unwrap());
        let txt = format_summary(&summarize(&series, 2025));
        assert!(txt.contains("Source: manual | months=23"));
        assert!(txt.contains("Latest: 2025-11"));
        assert!(txt.contains("YoY growth: +"));
    }

    #[test]
    fn summary_shows_unavailable_figures() {
        let series = enrich(&manual_series(), &PopulationTable::australia().unwrap());
        let txt = format_summary(&summarize(&series, 2030));
        assert!(txt.contains("YTD 2030 mean: n/a"));
    }

    #[test]
    fn chart_table_has_one_line_per_month() {
        let series = enrich(&manual_series(), &PopulationTable::australia().unwrap());
        let txt = format_chart_table(&chart_window(&series, 3));
        assert_eq!(txt.lines().count(), 5);
        assert!(txt.lines().nth(2).unwrap().starts_with("2025-09"));
    }

    #[test]
    fn cross_tab_marks_baseline_and_note() {
        let tables = SurveyTables::hes_2015_16().unwrap();
        let dist = derive_all(&tables, &IncomeTable::hes_2015_16().unwrap(), &InflationFactors::default());
        let txt = format_cross_tab(&dist.cross_tab);
        assert!(txt.contains("Quintile 3*"));
        assert!(txt.contains("$505"));
        assert!(txt.contains("Modeled estimate"));
    }

    #[test]
    fn distribution_lists_every_table() {
        let tables = SurveyTables::hes_2015_16().unwrap();
        let factors = InflationFactors::default();
        let dist = derive_all(&tables, &IncomeTable::hes_2015_16().unwrap(), &factors);
        let txt = format_distribution(
            &dist,
            &distribution_summary(&dist, &tables, &factors),
            &per_person_summary(&dist, &tables),
        );
        assert!(txt.contains("Quintile 1 (Lowest 20%)"));
        assert!(txt.contains("Couple with children"));
        assert!(txt.contains("lowest: DSP Only (No Work)"));
        assert!(txt.contains("31% increase (2016 to 2025)"));
    }

    #[test]
    fn truncate_long_labels() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
