//! Travel-time prediction capability consumed by the optimised search.
//!
//! The [`TravelTimePredictor`] trait abstracts whatever model estimates the
//! minutes needed to traverse an edge. Implementations live outside the core
//! (see the `courier-predictor` crate); the core only calls them.
//!
//! [`MemoizedPredictor`] wraps a predictor with a per-feature cache for
//! callers who want to avoid repeated model invocations.

mod error;
mod memo;
mod provider;

pub use error::PredictionError;
pub use memo::MemoizedPredictor;
pub use provider::{TravelFeatures, TravelTimePredictor};
