//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging
//! - runs the series and/or distribution pipelines
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Command, DashboardArgs, DistributionArgs, SeriesArgs, SourceArgs};
use crate::error::AppError;

pub mod pipeline;

use pipeline::{DashboardPayload, DistributionPayload, ReferenceData, SeriesOptions};

/// Entry point for the `foodspend` binary.
pub fn run() -> Result<(), AppError> {
    // `foodspend` and `foodspend --offline` behave like `foodspend series ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    init_logging();

    let refs = ReferenceData::load()?;
    match cli.command {
        Command::Series(args) => handle_series(args, &refs),
        Command::Distribution(args) => handle_distribution(args, &refs),
        Command::Crosstab => handle_crosstab(&refs),
        Command::Dashboard(args) => handle_dashboard(args, &refs),
    }
}

/// Log to stderr so stdout stays clean for reports and JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn series_options(args: &SourceArgs) -> SeriesOptions {
    SeriesOptions {
        offline: args.offline,
        months: args.months,
        ytd_year: args.ytd_year,
    }
}

fn handle_series(args: SeriesArgs, refs: &ReferenceData) -> Result<(), AppError> {
    let run = pipeline::run_series(&series_options(&args.source), refs)?;

    println!("{}", crate::report::format_summary(&run.summary));
    println!("{}", crate::report::format_chart_table(&run.chart));

    if args.plot && !args.no_plot {
        println!("{}", crate::plot::render_series_plot(&run.chart, args.width, args.height));
    }

    if let Some(path) = &args.export_csv {
        crate::io::write_series_csv(path, &run.series)?;
        info!(path = %path.display(), rows = run.series.len(), "wrote series CSV");
    }

    Ok(())
}

fn handle_distribution(args: DistributionArgs, refs: &ReferenceData) -> Result<(), AppError> {
    let run = pipeline::run_distribution(refs);

    if args.json {
        return crate::io::write_json(None, &DistributionPayload::new(&run));
    }

    println!(
        "{}",
        crate::report::format_distribution(&run.distribution, &run.summary, &run.per_person)
    );
    Ok(())
}

fn handle_crosstab(refs: &ReferenceData) -> Result<(), AppError> {
    let run = pipeline::run_distribution(refs);
    println!("{}", crate::report::format_cross_tab(&run.distribution.cross_tab));
    Ok(())
}

fn handle_dashboard(args: DashboardArgs, refs: &ReferenceData) -> Result<(), AppError> {
    let series = pipeline::run_series(&series_options(&args.source), refs)?;
    let distribution = pipeline::run_distribution(refs);
    let payload = DashboardPayload::new(&series, &distribution);

    crate::io::write_json(args.out.as_deref(), &payload)?;
    if let Some(path) = &args.out {
        info!(path = %path.display(), source = %series.summary.data_source, "wrote dashboard JSON");
    }
    Ok(())
}

/// Rewrite argv so `foodspend` defaults to `foodspend series`.
///
/// Rules:
/// - `foodspend`                          -> `foodspend series`
/// - `foodspend --offline ...`            -> `foodspend series --offline ...`
/// - `foodspend --help/--version/-h`      -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("series".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "series".to_string());
    }
    argv
}
