//! Demographic Projection CLI
//!
//! Command-line interface for projecting the omega tensor

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use demographic_projection::data::loader::DEFAULT_DATA_PATH;
use demographic_projection::{DemographicData, OmegaProjector, ProjectionConfig};

#[derive(Parser, Debug)]
#[clap(
    name = "demographic_projection",
    version,
    about = "Project population shares by period, age cohort, and ability type."
)]
struct Args {
    /// Number of age cohorts (S); must divide 60
    #[clap(short = 's', long, default_value_t = 60)]
    cohorts: usize,

    /// Number of ability types (J)
    #[clap(short = 'j', long, default_value_t = 1)]
    ability_types: usize,

    /// Number of periods to project (T)
    #[clap(short = 't', long, default_value_t = 60)]
    periods: usize,

    /// Directory holding demographic_data.csv and mortality_rates.csv
    #[clap(long, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// Where to write the omega tensor as CSV
    #[clap(short, long, default_value = "omega_output.csv")]
    output: PathBuf,

    /// Print the summary as JSON instead of a table
    #[clap(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = DemographicData::load_from(&args.data_dir)
        .with_context(|| format!("Failed to load tables from {}", args.data_dir.display()))?;

    let config = ProjectionConfig::new(args.cohorts, args.ability_types, args.periods);
    let projector = OmegaProjector::new(&data, config);
    let rates = projector.rates().context("Rate fitting failed")?;
    let omega = projector.project_with(&rates).context("Projection failed")?;

    omega
        .write_csv(&args.output)
        .with_context(|| format!("Unable to write {}", args.output.display()))?;

    let summary = omega.summary();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Demographic Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("==============================\n");
    println!(
        "Dimensions: T={} S={} J={}",
        summary.periods, summary.cohorts, summary.ability_types
    );

    let initial = omega.cohort_totals(0).unwrap_or_default();

    println!("\n{:>6} {:>12} {:>12} {:>12}", "Cohort", "Survival", "Fertility", "Omega[0]");
    println!("{}", "-".repeat(45));
    for (s, share) in initial.iter().enumerate().take(15) {
        println!(
            "{:>6} {:>12.8} {:>12.8} {:>12.8}",
            s,
            rates.survival[[s, 0]],
            rates.fertility[[s, 0]],
            share
        );
    }
    if initial.len() > 15 {
        println!("... ({} more cohorts)", initial.len() - 15);
    }

    println!("\nPopulation share by period:");
    let totals = omega.period_totals();
    let milestones = [0, 1, 5, 10, 25, 50, 100];
    for &t in milestones.iter().filter(|&&t| t < totals.len()) {
        println!("  Period {:>3}: {:.8}", t, totals[t]);
    }

    println!("\nFull results written to: {}", args.output.display());
    Ok(())
}
