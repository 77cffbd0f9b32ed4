mod config;
mod data;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hydrobucket_core::bucket::constants::MASS_BALANCE_TOLERANCE;
use hydrobucket_core::metrics::StreamflowComparison;
use hydrobucket_core::Simulator;
use tracing::{info, warn};

use crate::config::load_parameters;
use crate::data::{read_forcing, write_results};
use crate::logging::setup_tracing;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bucket model over a forcing file.
    Run {
        /// Path to the forcing CSV.
        forcing: PathBuf,
        /// Path to the TOML parameter file.
        #[arg(short, long)]
        params: PathBuf,
        /// Write daily results to this CSV.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Largest accepted relative mass balance residual.
        #[arg(short, long, default_value_t = MASS_BALANCE_TOLERANCE)]
        tolerance: f64,
        #[arg(long, default_value_t = false)]
        debug: bool,
    },
    /// Validate a parameter file and list its advisories.
    Check {
        /// Path to the TOML parameter file.
        #[arg(short, long)]
        params: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run {
            forcing,
            params,
            output,
            tolerance,
            debug,
        } => {
            setup_tracing(*debug).context("Failed to setup tracing")?;
            run(forcing, params, output.as_deref(), *tolerance)
        }
        Commands::Check { params } => {
            setup_tracing(false).context("Failed to setup tracing")?;
            check(params)
        }
    }
}

fn run(forcing_path: &Path, params_path: &Path, output_path: Option<&Path>, tolerance: f64) -> Result<()> {
    let params = load_parameters(params_path)
        .with_context(|| format!("Failed to load parameters from {}", params_path.display()))?;
    let forcing = read_forcing(forcing_path)
        .with_context(|| format!("Failed to read forcing from {}", forcing_path.display()))?;
    info!(days = forcing.len(), "Loaded forcing from {}", forcing_path.display());

    let mut sim = Simulator::initialize(params)?;
    let results = sim.run(&forcing);
    let report = sim.finalize(&results);

    info!(
        precipitation_m3 = report.total_precipitation_m3,
        evapotranspiration_m3 = report.total_evapotranspiration_m3,
        runoff_m3 = report.total_runoff_m3,
        storage_change_m3 = report.total_storage_change_m3,
        residual_m3 = report.residual_m3,
        "Mass balance"
    );

    if forcing.has_observations() {
        match StreamflowComparison::compute(&forcing.observed_streamflow(), &results.streamflow_m3_per_s) {
            Some(c) => info!(
                days = c.n_days,
                nse = c.nse,
                log_nse = c.log_nse,
                kge = c.kge,
                pbias = c.pbias,
                rmse = c.rmse,
                mae = c.mae,
                "Streamflow comparison"
            ),
            None => warn!("Fewer than two observed days, skipping streamflow comparison"),
        }
    }

    if let Some(path) = output_path {
        write_results(path, &forcing, &results)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        info!("Results written to {}", path.display());
    }

    let relative = report.relative_residual();
    if !report.is_closed(tolerance) {
        bail!("Mass balance not closed: relative residual {relative:e} exceeds {tolerance:e}");
    }
    info!("Mass balance closed (relative residual {relative:e})");

    Ok(())
}

fn check(params_path: &Path) -> Result<()> {
    let params = load_parameters(params_path)
        .with_context(|| format!("Failed to load parameters from {}", params_path.display()))?;

    let advisories = params.advisories();
    if advisories.is_empty() {
        info!("{} is valid", params_path.display());
    }
    for advisory in &advisories {
        warn!("{advisory}");
    }

    Ok(())
}
