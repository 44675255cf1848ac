//! CHIT CLI — replay ledger scenarios without the dashboard.
//!
//! Commands:
//! - `run` — replay a TOML scenario, settling each action immediately
//! - `config` — print the default ledger configuration as TOML

mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chit_core::format::{format_chit, format_usd};
use chit_core::{Ledger, LedgerConfig, Tab};

use crate::scenario::{Scenario, ScenarioReport};

#[derive(Parser)]
#[command(name = "chit", about = "CHIT ledger CLI — replay mock marketplace actions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the steps of a scenario file against a fresh ledger.
    Run {
        /// Path to a TOML scenario file.
        scenario: PathBuf,

        /// Ledger configuration (opening balances, operator, seed).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the receipt RNG seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default ledger configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            config,
            seed,
            json,
        } => run_scenario_cmd(scenario, config, seed, json),
        Commands::Config => {
            print!("{}", LedgerConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn run_scenario_cmd(
    scenario_path: PathBuf,
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => LedgerConfig::load(&path)
            .with_context(|| format!("loading ledger config {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let scenario = Scenario::from_file(&scenario_path)?;
    tracing::info!(
        path = %scenario_path.display(),
        steps = scenario.steps.len(),
        "replaying scenario"
    );

    let mut ledger = Ledger::new(config);
    let report = scenario.replay(&mut ledger);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &ledger);
    }
    Ok(())
}

fn print_report(report: &ScenarioReport, ledger: &Ledger) {
    for (i, step) in report.steps.iter().enumerate() {
        match (&step.receipt_id, &step.error) {
            (Some(receipt), _) => println!("{:>3}. {:<18} ok      receipt {receipt}", i + 1, step.label),
            (None, Some(err)) => println!("{:>3}. {:<18} failed  {err}", i + 1, step.label),
            (None, None) => println!("{:>3}. {:<18} skipped", i + 1, step.label),
        }
    }
    println!();

    let b = &report.balances;
    println!("{:<18} {:>24}", "Alpha", format_usd(b.alpha));
    println!("{:<18} {:>24}", "Beta", format_usd(b.beta));
    println!("{:<18} {:>24}", "Sub Accounts", format_usd(b.funding_total()));
    println!("{:<18} {:>24}", "Trading", format_chit(b.trading));
    println!();

    for tab in Tab::ALL {
        println!("{:<18} {:>24}", tab.label(), ledger.log().count(tab.status()));
    }
}
