//! `ingest` command: expand a Solomon benchmark directory into edge records.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use courier_data::{load_solomon_dir, write_edge_records};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::{DatasetSummary, write_json};
use crate::{
    ARG_DATASET_DIR, ARG_OUTPUT, ARG_SEED, CliError, ENV_INGEST_DATASET_DIR, ENV_INGEST_OUTPUT,
};

const DEFAULT_SEED: u64 = 42;

/// CLI arguments for the `ingest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Parse the first .txt Solomon VRP benchmark in a directory, \
                 link every customer to every other customer with simulated \
                 traffic, fuel cost and time of day, and write the links as \
                 edge-record CSV.",
    about = "Expand a Solomon benchmark directory into edge records"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct IngestArgs {
    /// Directory holding `.txt` benchmark files.
    #[arg(long = ARG_DATASET_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) dataset_dir: Option<Utf8PathBuf>,
    /// Destination CSV file.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Seed for the simulated link attributes (default 42).
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl IngestArgs {
    fn into_config(self) -> Result<IngestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        IngestConfig::try_from(merged)
    }
}

/// Resolved `ingest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IngestConfig {
    pub(crate) dataset_dir: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
    pub(crate) seed: u64,
}

impl TryFrom<IngestArgs> for IngestConfig {
    type Error = CliError;

    fn try_from(args: IngestArgs) -> Result<Self, Self::Error> {
        let dataset_dir = args.dataset_dir.ok_or(CliError::MissingArgument {
            field: ARG_DATASET_DIR,
            env: ENV_INGEST_DATASET_DIR,
        })?;
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_INGEST_OUTPUT,
        })?;
        Ok(Self {
            dataset_dir,
            output,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
        })
    }
}

pub(crate) fn run_ingest(args: IngestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let links =
        load_solomon_dir(&config.dataset_dir, config.seed).map_err(|source| CliError::Ingest {
            dir: config.dataset_dir.clone(),
            source,
        })?;
    write_edge_records(&config.output, &links).map_err(CliError::WriteRecords)?;
    write_json(
        writer,
        &DatasetSummary {
            output: config.output,
            records: links.len(),
        },
    )
}
