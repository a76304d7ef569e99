//! Profit calculator from the command line
//!
//! Prints the month-by-month trajectory and the rounded totals, optionally
//! writing the trajectory to CSV or comparing every strategy preset.

use anyhow::{bail, Context, Result};
use clap::Parser;
use quantdesk::config::ConsoleConfig;
use quantdesk::projection::{
    project_grid, PresetTable, PresetTableKind, ProjectorConfig, ReturnProjector, Scenario, StrategyPreset,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "project_returns", about = "Project compounding returns")]
struct Args {
    /// Starting amount
    #[arg(long)]
    principal: Option<f64>,

    /// Rate applied once per period (0.5 = 50%)
    #[arg(long, conflicts_with = "strategy")]
    rate: Option<f64>,

    /// Strategy preset: conservative, balanced or aggressive
    #[arg(long)]
    strategy: Option<StrategyPreset>,

    /// Preset table: monthly or annualized
    #[arg(long)]
    table: Option<PresetTableKind>,

    /// Number of compounding periods
    #[arg(long)]
    periods: Option<u32>,

    /// Write the trajectory to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Also project every preset side by side
    #[arg(long)]
    compare: bool,

    /// JSON config file (defaults to $QUANTDESK_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => ConsoleConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConsoleConfig::from_env().context("loading config")?,
    };

    let mut settings = config.projector.clone();
    if let Some(table) = args.table {
        settings.preset_table = table;
    }
    let projector = ReturnProjector::new(ProjectorConfig::from_settings(&settings));

    let principal = args.principal.unwrap_or(settings.default_principal);
    let periods = args.periods.unwrap_or(settings.default_periods);
    let presets = PresetTable::for_kind(settings.preset_table);

    let rate = match (args.rate, args.strategy) {
        (Some(rate), _) => rate,
        (None, Some(preset)) => presets.periodic_rate(preset),
        (None, None) => bail!("either --rate or --strategy is required"),
    };

    let result = projector.project(principal, rate, periods)?;

    println!("Principal: {:.2}, periodic rate: {}, periods: {}", principal, rate, periods);
    println!("{:>6} | {:>16} | {:>18} | {:>18}", "Period", "Profit", "Cumulative", "Balance");
    for row in &result.trajectory {
        println!(
            "{:>6} | {:>16.4} | {:>18.4} | {:>18.4}",
            row.period_index, row.periodic_profit, row.cumulative_profit, row.balance
        );
    }
    println!("\nSummary:");
    println!("  Total profit:       {:.2}", result.summary.total_profit);
    println!("  Final balance:      {:.2}", result.summary.final_balance);
    println!("  Avg profit/period:  {:.2}", result.average_periodic_profit());

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        result
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Trajectory written to {}", path.display());
    }

    if args.compare {
        let scenarios: Vec<Scenario> = StrategyPreset::ALL
            .iter()
            .map(|preset| Scenario {
                principal,
                periodic_rate: presets.periodic_rate(*preset),
                periods,
            })
            .collect();

        println!("\nPresets ({:?} table):", presets.kind());
        for (preset, outcome) in StrategyPreset::ALL.iter().zip(project_grid(&projector, &scenarios)) {
            match outcome.result {
                Ok(summary) => println!(
                    "  {:<13} rate {:>8.4}  profit {:>16.2}  balance {:>16.2}",
                    preset.label(),
                    outcome.scenario.periodic_rate,
                    summary.total_profit,
                    summary.final_balance
                ),
                Err(err) => println!("  {:<13} {}", preset.label(), err),
            }
        }
    }

    log::debug!("total time: {:?}", start.elapsed());
    Ok(())
}
