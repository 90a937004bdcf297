//! Command-line interface for the Courier routing engine.
//!
//! Four subcommands cover the offline workflow: `generate` and `ingest`
//! produce edge-record CSV files, `train` fits and stores a travel-time
//! model, and `route` compares the baseline and optimised routes between two
//! locations. Every command prints a JSON report to stdout; logs go to
//! stderr.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod error;
mod generate;
mod ingest;
mod logging;
mod output;
mod paths;
mod route;
mod train;

pub use error::CliError;
pub use logging::{LOG_ENV, init_logging};
pub use route::{RouteComparison, compare_routes};

use generate::GenerateArgs;
use ingest::IngestArgs;
use route::RouteArgs;
use train::TrainArgs;

const ARG_OUTPUT: &str = "output";
const ARG_RECORDS: &str = "records";
const ARG_LOCATIONS: &str = "locations";
const ARG_SEED: &str = "seed";
const ARG_DATASET_DIR: &str = "dataset-dir";
const ARG_MODEL: &str = "model";
const ARG_TEST_FRACTION: &str = "test-fraction";
const ARG_RIDGE: &str = "ridge";
const ARG_FROM: &str = "from";
const ARG_TO: &str = "to";
const ARG_TIME_OF_DAY: &str = "time-of-day";

const ENV_GENERATE_OUTPUT: &str = "COURIER_CMDS_GENERATE_OUTPUT";
const ENV_INGEST_DATASET_DIR: &str = "COURIER_CMDS_INGEST_DATASET_DIR";
const ENV_INGEST_OUTPUT: &str = "COURIER_CMDS_INGEST_OUTPUT";
const ENV_TRAIN_RECORDS: &str = "COURIER_CMDS_TRAIN_RECORDS";
const ENV_TRAIN_MODEL: &str = "COURIER_CMDS_TRAIN_MODEL";
const ENV_ROUTE_RECORDS: &str = "COURIER_CMDS_ROUTE_RECORDS";
const ENV_ROUTE_MODEL: &str = "COURIER_CMDS_ROUTE_MODEL";
const ENV_ROUTE_FROM: &str = "COURIER_CMDS_ROUTE_FROM";
const ENV_ROUTE_TO: &str = "COURIER_CMDS_ROUTE_TO";

/// Run the Courier CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, or the chosen
/// command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Generate(args) => generate::run_generate(args, writer),
        Command::Ingest(args) => ingest::run_ingest(args, writer),
        Command::Train(args) => train::run_train(args, writer),
        Command::Route(args) => route::run_route(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "courier",
    about = "Plan and compare delivery routes with a learned travel-time model",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a seeded synthetic edge-record dataset.
    Generate(GenerateArgs),
    /// Expand a Solomon benchmark directory into edge records.
    Ingest(IngestArgs),
    /// Fit a travel-time model and report its held-out accuracy.
    Train(TrainArgs),
    /// Compare the baseline and optimised routes between two locations.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
