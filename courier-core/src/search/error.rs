use thiserror::Error;

use crate::PredictionError;

/// Errors from [`crate::search::shortest_path`] and the route operations
/// built on it.
///
/// A missing route is not an error: searches report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The source or target is not a node of the graph. Raised before any
    /// traversal happens.
    #[error("location '{name}' is not in the graph")]
    UnknownNode {
        /// The requested location name.
        name: String,
    },
    /// A weight function returned a negative or non-finite value.
    #[error("weight {weight} for edge {from} -> {to} is not a finite non-negative number")]
    InvalidWeight {
        /// Origin of the offending edge.
        from: String,
        /// Destination of the offending edge.
        to: String,
        /// The rejected weight.
        weight: f64,
    },
    /// Accumulated path weight through an edge exceeded the range of `f64`.
    #[error("path weight through edge {from} -> {to} overflows")]
    WeightOverflow {
        /// Origin of the edge being relaxed.
        from: String,
        /// Destination of the edge being relaxed.
        to: String,
    },
    /// The travel-time predictor failed; the search was abandoned.
    #[error("travel time prediction failed for edge {from} -> {to}")]
    Prediction {
        /// Origin of the edge being weighed.
        from: String,
        /// Destination of the edge being weighed.
        to: String,
        /// Failure reported by the predictor.
        #[source]
        source: PredictionError,
    },
}
