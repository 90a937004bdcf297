//! `generate` command: write a seeded synthetic dataset.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use courier_data::{SyntheticConfig, generate_records, write_edge_records};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{DatasetSummary, write_json};
use crate::{ARG_LOCATIONS, ARG_OUTPUT, ARG_RECORDS, ARG_SEED, CliError, ENV_GENERATE_OUTPUT};

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Generate random links between distinct synthetic locations \
                 with simulated distance, demand, fuel cost, traffic and time \
                 of day, and write them as edge-record CSV.",
    about = "Write a seeded synthetic edge-record dataset"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct GenerateArgs {
    /// Destination CSV file.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Number of records to generate (default 200).
    #[arg(long = ARG_RECORDS, value_name = "count")]
    #[serde(default)]
    pub(crate) records: Option<usize>,
    /// Number of distinct locations (default 20, at least 2).
    #[arg(long = ARG_LOCATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) locations: Option<usize>,
    /// Generator seed (default 42).
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl GenerateArgs {
    fn into_config(self) -> Result<GenerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GenerateConfig::try_from(merged)
    }
}

/// Resolved `generate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GenerateConfig {
    pub(crate) output: Utf8PathBuf,
    pub(crate) synthetic: SyntheticConfig,
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_GENERATE_OUTPUT,
        })?;
        let defaults = SyntheticConfig::default();
        Ok(Self {
            output,
            synthetic: SyntheticConfig {
                num_records: args.records.unwrap_or(defaults.num_records),
                num_locations: args.locations.unwrap_or(defaults.num_locations),
                seed: args.seed.unwrap_or(defaults.seed),
            },
        })
    }
}

pub(crate) fn run_generate(args: GenerateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_generate(&config, writer)
}

pub(crate) fn execute_generate(
    config: &GenerateConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let records = generate_records(&config.synthetic).map_err(CliError::Generate)?;
    write_edge_records(&config.output, &records).map_err(CliError::WriteRecords)?;
    log::info!(
        "generated {} records and saved them to {}",
        records.len(),
        config.output
    );
    write_json(
        writer,
        &DatasetSummary {
            output: config.output.clone(),
            records: records.len(),
        },
    )
}
