//! Command-line parsing for the household food spending pipeline.
//!
//! Argument parsing stays here; the pipeline and formatting live elsewhere.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "foodspend",
    version,
    about = "Household food spending: monthly per-household series and survey distributions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the national series, derive per-household figures, print summary and plot.
    Series(SeriesArgs),
    /// Print the survey distribution tables (income quintile, household type, segment).
    Distribution(DistributionArgs),
    /// Print the modeled household type × income quintile matrix.
    Crosstab,
    /// Write the full dashboard payload as JSON.
    Dashboard(DashboardArgs),
}

/// Options shared by everything that loads the monthly series.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Skip the network and use the built-in series.
    #[arg(long)]
    pub offline: bool,

    /// Number of trailing months in the chart window.
    #[arg(long, default_value_t = 24)]
    pub months: usize,

    /// Calendar year for the year-to-date mean (defaults to the latest month's year).
    #[arg(long)]
    pub ytd_year: Option<i32>,
}

#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Export the enriched series to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DistributionArgs {
    /// Print summaries and chart series as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output file (stdout when omitted).
    #[arg(long, value_name = "JSON")]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_defaults() {
        let cli = Cli::parse_from(["foodspend", "series"]);
        let Command::Series(args) = cli.command else {
            panic!("expected series");
        };
        assert!(!args.source.offline);
        assert_eq!(args.source.months, 24);
        assert_eq!(args.source.ytd_year, None);
        assert!(args.plot && !args.no_plot);
        assert_eq!(args.export_csv, None);
    }

    #[test]
    fn dashboard_flags() {
        let cli = Cli::parse_from([
            "foodspend", "dashboard", "--offline", "--months", "6", "--ytd-year", "2024", "--out", "d.json",
        ]);
        let Command::Dashboard(args) = cli.command else {
            panic!("expected dashboard");
        };
        assert!(args.source.offline);
        assert_eq!(args.source.months, 6);
        assert_eq!(args.source.ytd_year, Some(2024));
        assert_eq!(args.out, Some(PathBuf::from("d.json")));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
