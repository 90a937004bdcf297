//! Core routing logic for the Courier engine.
//!
//! The crate turns edge records into an immutable directed [`RouteGraph`],
//! searches it with a single generalised Dijkstra routine, and prices the
//! resulting paths. Two route operations sit on top of the search:
//!
//! - [`find_baseline_route`] minimises distance and reports a derived travel
//!   time;
//! - [`find_optimized_route`] minimises the minutes estimated by a pluggable
//!   [`TravelTimePredictor`].
//!
//! Everything here is synchronous and free of global state. Data loading,
//! model fitting and reporting live in the collaborator crates.
//!
//! # Examples
//!
//! ```
//! use courier_core::{EdgeRecord, build_graph, find_baseline_route, path_cost};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = build_graph([
//!     EdgeRecord::new("Depot", "Mill", 100.0, "morning").with_fuel_cost_per_km(0.2),
//!     EdgeRecord::new("Mill", "Quay", 100.0, "morning").with_fuel_cost_per_km(0.2),
//!     EdgeRecord::new("Depot", "Quay", 300.0, "morning").with_fuel_cost_per_km(0.2),
//! ])?;
//! let route = find_baseline_route(&graph, "Depot", "Quay")?.expect("Quay is reachable");
//! assert_eq!(route.path, ["Depot", "Mill", "Quay"]);
//! assert_eq!(path_cost(&graph, &route.path), 40.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cost;
pub mod graph;
pub mod predictor;
mod record;
pub mod routes;
pub mod search;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cost::{DEFAULT_FUEL_COST_PER_KM, path_cost};
pub use graph::{EdgeAttributes, GraphBuildError, NodeId, RecordDefect, RouteGraph, build_graph};
pub use predictor::{MemoizedPredictor, PredictionError, TravelFeatures, TravelTimePredictor};
pub use record::{EdgeRecord, ParseTimeOfDayError, TimeOfDay};
pub use routes::{
    DistanceWeight, PlannedRoute, PredictedTimeWeight, baseline_travel_minutes,
    find_baseline_route, find_optimized_route,
};
pub use search::{EdgeWeight, SearchContext, SearchError, ShortestPath, shortest_path};
