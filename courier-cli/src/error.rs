//! Error types emitted by the Courier CLI.
//!
//! Keep this error type reasonably small: every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::{GraphBuildError, PredictionError, SearchError};
use courier_data::DataError;
use courier_predictor::{FitError, ModelFileError, SampleError};
use thiserror::Error;

/// Errors emitted by the Courier CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Generating a synthetic dataset failed.
    #[error("failed to generate synthetic records: {0}")]
    Generate(#[source] DataError),
    /// Expanding a benchmark directory into links failed.
    #[error("failed to ingest dataset directory {dir:?}: {source}")]
    Ingest {
        dir: Utf8PathBuf,
        #[source]
        source: DataError,
    },
    /// Reading edge records failed.
    #[error("failed to load edge records: {0}")]
    LoadRecords(#[source] DataError),
    /// Writing edge records failed.
    #[error("failed to write edge records: {0}")]
    WriteRecords(#[source] DataError),
    /// The edge records did not form a valid graph.
    #[error("edge records in {path:?} are invalid: {source}")]
    BuildGraph {
        path: Utf8PathBuf,
        #[source]
        source: GraphBuildError,
    },
    /// The edge records could not be turned into training samples.
    #[error("failed to prepare training samples: {0}")]
    PrepareSamples(#[from] SampleError),
    /// Fitting the travel-time model failed.
    #[error("failed to fit travel-time model: {0}")]
    Fit(#[from] FitError),
    /// Scoring the fitted model failed.
    #[error("failed to evaluate travel-time model: {0}")]
    Evaluate(#[source] PredictionError),
    /// Writing or reading the model file failed.
    #[error(transparent)]
    ModelFile(#[from] ModelFileError),
    /// Route planning failed.
    #[error("route planning failed: {0}")]
    Route(#[from] SearchError),
    /// Serializing a command report failed.
    #[error("failed to serialize report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing a command report failed.
    #[error("failed to write report: {0}")]
    WriteOutput(#[source] std::io::Error),
}
