//! Predictor trait and the feature vector it consumes.

use crate::TimeOfDay;
use crate::graph::EdgeAttributes;

use super::error::PredictionError;

/// Inputs of a single travel-time prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelFeatures {
    /// Link length in kilometres.
    pub distance_km: f64,
    /// Delivery demand on the link.
    pub delivery_demand: f64,
    /// Traffic multiplier on the link.
    pub traffic_factor: f64,
    /// Time of day the trip happens in.
    pub time_of_day: TimeOfDay,
}

impl TravelFeatures {
    /// Features of `edge` evaluated at `time_of_day`.
    ///
    /// The edge's own recorded time of day is ignored: the caller's context
    /// applies to every edge of a search.
    #[must_use]
    pub const fn for_edge(edge: &EdgeAttributes, time_of_day: TimeOfDay) -> Self {
        Self {
            distance_km: edge.distance_km,
            delivery_demand: edge.demand,
            traffic_factor: edge.traffic_factor,
            time_of_day,
        }
    }

    /// Check every numeric feature is finite.
    ///
    /// # Errors
    /// Returns [`PredictionError::NonFiniteFeature`] naming the first bad
    /// feature.
    pub fn ensure_finite(&self) -> Result<(), PredictionError> {
        [
            ("distance_km", self.distance_km),
            ("delivery_demand", self.delivery_demand),
            ("traffic_factor", self.traffic_factor),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map_or(Ok(()), |(feature, _)| {
            Err(PredictionError::NonFiniteFeature { feature })
        })
    }
}

/// Estimate the minutes needed to traverse a link.
///
/// Implementations must behave like pure functions: the same features always
/// yield the same estimate and no external state is mutated. They must be
/// `Send + Sync` so a fitted model can be shared by concurrent searches.
///
/// # Examples
///
/// ```rust
/// use courier_core::{PredictionError, TimeOfDay, TravelFeatures, TravelTimePredictor};
///
/// struct NightOwl;
///
/// impl TravelTimePredictor for NightOwl {
///     fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
///         features.ensure_finite()?;
///         let factor = if features.time_of_day == TimeOfDay::Night { 0.5 } else { 1.0 };
///         Ok(features.distance_km * factor)
///     }
/// }
///
/// let features = TravelFeatures {
///     distance_km: 10.0,
///     delivery_demand: 3.0,
///     traffic_factor: 1.2,
///     time_of_day: TimeOfDay::Night,
/// };
/// assert_eq!(NightOwl.predict(&features)?, 5.0);
/// # Ok::<(), PredictionError>(())
/// ```
pub trait TravelTimePredictor: Send + Sync {
    /// Predicted travel time in minutes for `features`.
    ///
    /// # Errors
    /// Returns [`PredictionError`] when no estimate can be produced.
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError>;
}

impl<P> TravelTimePredictor for &P
where
    P: TravelTimePredictor + ?Sized,
{
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
        (**self).predict(features)
    }
}

impl<P> TravelTimePredictor for Box<P>
where
    P: TravelTimePredictor + ?Sized,
{
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
        (**self).predict(features)
    }
}
