mod analysis;
mod input;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::pipeline::PipelineError;
use crate::pipeline::reference::{QueryCustomer, run_reference};
use crate::pipeline::trend::run_trend;

#[derive(Debug, Parser)]
#[command(
    name = "dermascore",
    version,
    about = "Composite skin aging score analysis from facial-feature grade tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the age-banded percentile reference table and diagnose one
    /// customer against their band.
    Reference {
        /// Grades CSV with Age plus the seven feature columns.
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Age of the customer to diagnose.
        #[arg(long, default_value_t = 35)]
        age: u32,
        /// Seven grades, comma separated, in column order: chin_sagging,
        /// forehead_pigmentation, forehead_wrinkle, glabellus_wrinkle,
        /// l_cheek_pore, lip_dryness, r_cheek_pore.
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "1,2,4,3,2,2,2",
            allow_hyphen_values = true
        )]
        grades: Vec<f64>,
    },
    /// Detect ages where the aging score accelerates and render the
    /// trend chart.
    Trend {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = run(Cli::parse()) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Command::Reference {
            input,
            out,
            age,
            grades,
        } => {
            let customer = QueryCustomer::new(age, &grades)?;
            run_reference(&input, &out, &customer)?;
        }
        Command::Trend { input, out } => {
            run_trend(&input, &out)?;
        }
    }
    Ok(())
}
