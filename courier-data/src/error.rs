//! Error types raised while loading, generating or writing edge records.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised by the data collaborator.
#[derive(Debug, Error)]
pub enum DataError {
    /// Opening an input file failed.
    #[error("failed to open {path}")]
    OpenFile {
        /// Requested input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Creating an output file or its parent directory failed.
    #[error("failed to create {path}")]
    CreateFile {
        /// Requested output path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Reading a CSV row failed or the row did not match the record layout.
    #[error("failed to read edge records from {path}")]
    ReadCsv {
        /// CSV file being read.
        path: Utf8PathBuf,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// Writing a CSV row failed.
    #[error("failed to write edge records to {path}")]
    WriteCsv {
        /// CSV file being written.
        path: Utf8PathBuf,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// Synthetic generation needs at least two locations to form a link.
    #[error("synthetic data needs at least 2 locations, got {requested}")]
    NotEnoughLocations {
        /// Number of locations requested.
        requested: usize,
    },
    /// Listing a dataset directory failed.
    #[error("failed to list dataset directory {path}")]
    ReadDirectory {
        /// Directory being listed.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A dataset directory held no `.txt` benchmark files.
    #[error("no .txt files found in dataset directory {path}")]
    NoDatasetFiles {
        /// Directory that was searched.
        path: Utf8PathBuf,
    },
    /// Reading a benchmark file into memory failed.
    #[error("failed to read benchmark file {path}")]
    ReadBenchmark {
        /// Benchmark file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A benchmark file did not follow the Solomon layout.
    #[error("could not parse VRP data from {path}")]
    Solomon {
        /// Benchmark file path.
        path: Utf8PathBuf,
        /// Parse failure.
        #[source]
        source: SolomonError,
    },
}

/// Failures while parsing Solomon benchmark text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolomonError {
    /// No line contained the `CUST NO.` table header.
    #[error("missing CUST NO. header")]
    MissingHeader,
    /// A customer row did not hold seven numeric columns.
    #[error("line {line}: {reason}")]
    MalformedRow {
        /// One-based line number within the file.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },
}
