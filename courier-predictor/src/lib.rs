//! Travel-time model for the Courier engine.
//!
//! The crate fits a [`TrafficRegression`] to labelled edge records and plugs
//! it into [`courier_core::find_optimized_route`] through the
//! [`TravelTimePredictor`](courier_core::TravelTimePredictor) capability:
//! - [`samples_from_records`] labels each record with its observed minutes;
//! - [`train_test_split`] holds out a seeded share for [`evaluate`];
//! - [`write_model_file`] and [`read_model_file`] persist fitted models with
//!   `bincode`.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use courier_core::EdgeRecord;
//! use courier_predictor::{
//!     DEFAULT_RIDGE, TrafficRegression, evaluate, samples_from_records, train_test_split,
//!     write_model_file,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let records: Vec<EdgeRecord> = Vec::new();
//! let split = train_test_split(samples_from_records(&records)?, 0.2, 42)?;
//! let model = TrafficRegression::fit(&split.train, DEFAULT_RIDGE)?;
//! let report = evaluate(&model, &split.test)?;
//! println!("MAE={:.2} minutes, RMSE={:.2} minutes", report.mae, report.rmse);
//! write_model_file(Utf8Path::new("models/travel_time.bin"), &model)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod evaluation;
mod persistence;
mod regression;
mod samples;

pub use error::{FitError, ModelFileError, SampleError};
pub use evaluation::{EvaluationReport, evaluate};
pub use persistence::{read_model_file, write_model_file};
pub use regression::{DEFAULT_RIDGE, FEATURE_COUNT, FEATURE_NAMES, MIN_SAMPLES, TrafficRegression};
pub use samples::{Split, TrainingSample, samples_from_records, target_minutes, train_test_split};
