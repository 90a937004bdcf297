//! `train` command: fit, evaluate and store the travel-time model.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use courier_data::read_edge_records;
use courier_predictor::{
    DEFAULT_RIDGE, EvaluationReport, TrafficRegression, evaluate, samples_from_records,
    train_test_split, write_model_file,
};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::output::write_json;
use crate::paths::require_existing_file;
use crate::{
    ARG_MODEL, ARG_RECORDS, ARG_RIDGE, ARG_SEED, ARG_TEST_FRACTION, CliError, ENV_TRAIN_MODEL,
    ENV_TRAIN_RECORDS,
};

const DEFAULT_TEST_FRACTION: f64 = 0.2;
const DEFAULT_SEED: u64 = 42;

/// CLI arguments for the `train` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Label each edge record with its traffic-stretched travel \
                 time, hold out a seeded share for evaluation, fit the \
                 travel-time regression on the rest, store it with bincode \
                 and print its held-out MAE and RMSE.",
    about = "Fit a travel-time model and report its held-out accuracy"
)]
#[ortho_config(prefix = "COURIER")]
pub(crate) struct TrainArgs {
    /// Edge-record CSV to learn from.
    #[arg(long = ARG_RECORDS, value_name = "path")]
    #[serde(default)]
    pub(crate) records: Option<Utf8PathBuf>,
    /// Destination of the fitted model.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Share of samples held out for evaluation (default 0.2).
    #[arg(long = ARG_TEST_FRACTION, value_name = "fraction")]
    #[serde(default)]
    pub(crate) test_fraction: Option<f64>,
    /// Seed for the train/test shuffle (default 42).
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Ridge strength of the regression.
    #[arg(long = ARG_RIDGE, value_name = "strength")]
    #[serde(default)]
    pub(crate) ridge: Option<f64>,
}

impl TrainArgs {
    fn into_config(self) -> Result<TrainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TrainConfig::try_from(merged)
    }
}

/// Resolved `train` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrainConfig {
    pub(crate) records: Utf8PathBuf,
    pub(crate) model: Utf8PathBuf,
    pub(crate) test_fraction: f64,
    pub(crate) seed: u64,
    pub(crate) ridge: f64,
}

impl TrainConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing_file(&self.records, ARG_RECORDS)
    }
}

impl TryFrom<TrainArgs> for TrainConfig {
    type Error = CliError;

    fn try_from(args: TrainArgs) -> Result<Self, Self::Error> {
        let records = args.records.ok_or(CliError::MissingArgument {
            field: ARG_RECORDS,
            env: ENV_TRAIN_RECORDS,
        })?;
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_TRAIN_MODEL,
        })?;
        Ok(Self {
            records,
            model,
            test_fraction: args.test_fraction.unwrap_or(DEFAULT_TEST_FRACTION),
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            ridge: args.ridge.unwrap_or(DEFAULT_RIDGE),
        })
    }
}

pub(crate) fn run_train(args: TrainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = execute_train(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_train(config: &TrainConfig) -> Result<EvaluationReport, CliError> {
    let records = read_edge_records(&config.records).map_err(CliError::LoadRecords)?;
    let samples = samples_from_records(&records)?;
    let split = train_test_split(samples, config.test_fraction, config.seed)?;
    info!(
        "training on {} samples, holding out {}",
        split.train.len(),
        split.test.len()
    );
    let model = TrafficRegression::fit(&split.train, config.ridge)?;
    let report = evaluate(&model, &split.test).map_err(CliError::Evaluate)?;
    info!(
        "model performance: MAE={:.2} minutes, RMSE={:.2} minutes",
        report.mae, report.rmse
    );
    write_model_file(&config.model, &model)?;
    Ok(report)
}
