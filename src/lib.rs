//! Facade crate for the Courier routing engine.
//!
//! This crate re-exports the core graph, search and cost types, and exposes
//! dataset ingestion and the travel-time model behind feature flags.

#![forbid(unsafe_code)]

pub use courier_core::{
    DEFAULT_FUEL_COST_PER_KM, EdgeAttributes, EdgeRecord, GraphBuildError, MemoizedPredictor,
    PlannedRoute, PredictionError, RouteGraph, SearchError, TimeOfDay, TravelFeatures,
    TravelTimePredictor, build_graph, find_baseline_route, find_optimized_route, path_cost,
};

#[cfg(feature = "data")]
pub use courier_data::{DataError, read_edge_records, write_edge_records};

#[cfg(feature = "predictor")]
pub use courier_predictor::{TrafficRegression, read_model_file, write_model_file};
