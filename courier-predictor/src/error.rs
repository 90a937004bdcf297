//! Error types raised while preparing samples, fitting, or persisting models.

use camino::Utf8PathBuf;
use courier_core::RecordDefect;
use thiserror::Error;

/// Errors raised while turning edge records into training samples.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// A record failed validation.
    #[error("record {index} is malformed")]
    InvalidRecord {
        /// Position of the record in the input.
        index: usize,
        /// What was wrong with it.
        #[source]
        defect: RecordDefect,
    },
    /// The requested test fraction is outside `[0, 1)`.
    #[error("test fraction must lie in [0, 1), got {fraction}")]
    InvalidTestFraction {
        /// Rejected fraction.
        fraction: f64,
    },
}

/// Errors raised while fitting a regression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Too few samples were supplied.
    #[error("at least {required} samples are needed to fit, got {found}")]
    NotEnoughSamples {
        /// Minimum sample count.
        required: usize,
        /// Samples supplied.
        found: usize,
    },
    /// The ridge strength was negative or not finite.
    #[error("ridge strength must be finite and non-negative, got {ridge}")]
    InvalidRidge {
        /// Rejected strength.
        ridge: f64,
    },
    /// A sample carried a non-finite feature or target.
    #[error("sample {index} is not finite")]
    NonFiniteSample {
        /// Position of the sample in the input.
        index: usize,
    },
    /// The normal equations have no unique solution.
    #[error("training features are collinear; add samples or a ridge term")]
    Singular,
}

/// Errors raised while writing or reading a model file.
#[derive(Debug, Error)]
pub enum ModelFileError {
    /// Creating the model file or its parent directory failed.
    #[error("failed to create model file at {path}")]
    Create {
        /// Requested model path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Opening the model file failed.
    #[error("failed to open model file at {path}")]
    Open {
        /// Requested model path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Encoding the model with `bincode` failed.
    #[error("failed to encode model file at {path}")]
    Encode {
        /// Requested model path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// Flushing the encoded model to disk failed.
    #[error("failed to write model file at {path}")]
    Write {
        /// Requested model path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Decoding the model with `bincode` failed.
    #[error("failed to decode model file at {path}")]
    Decode {
        /// Requested model path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// The decoded model carries non-finite coefficients.
    #[error("model file at {path} holds non-finite coefficients")]
    Corrupt {
        /// Requested model path.
        path: Utf8PathBuf,
    },
}
