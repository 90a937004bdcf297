//! Deterministic predictors and record builders for unit and behaviour tests.
//!
//! Available under `cfg(test)` and behind the `test-support` feature.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{EdgeRecord, PredictionError, TravelFeatures, TravelTimePredictor};

/// Build a record with the attributes tests usually care about.
///
/// Demand is `0`, fuel cost is left unset and the time of day is
/// `afternoon`.
#[must_use]
pub fn record(from: &str, to: &str, distance_km: f64, traffic_factor: f64) -> EdgeRecord {
    EdgeRecord::new(from, to, distance_km, "afternoon").with_traffic_factor(traffic_factor)
}

/// Predictor returning `distance_km × traffic_factor`, the same quantity the
/// baseline reports as its derived travel time.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrafficTimePredictor;

impl TravelTimePredictor for TrafficTimePredictor {
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time scales distance by the traffic factor"
    )]
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
        features.ensure_finite()?;
        Ok(features.distance_km * features.traffic_factor)
    }
}

/// Predictor looking minutes up by exact edge distance.
///
/// Distances without an entry produce [`PredictionError::Model`].
///
/// # Examples
/// ```rust
/// use courier_core::{TimeOfDay, TravelFeatures, TravelTimePredictor};
/// use courier_core::test_support::DistanceTablePredictor;
///
/// let table = DistanceTablePredictor::new([(300.0, 50.0), (100.0, 80.0)]);
/// let features = TravelFeatures {
///     distance_km: 300.0,
///     delivery_demand: 0.0,
///     traffic_factor: 1.0,
///     time_of_day: TimeOfDay::Afternoon,
/// };
/// assert_eq!(table.predict(&features), Ok(50.0));
/// ```
#[derive(Debug, Default, Clone)]
pub struct DistanceTablePredictor {
    entries: Vec<(f64, f64)>,
}

impl DistanceTablePredictor {
    /// Create a table from `(distance_km, minutes)` pairs.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl TravelTimePredictor for DistanceTablePredictor {
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
        self.entries
            .iter()
            .find(|(distance, _)| distance.to_bits() == features.distance_km.to_bits())
            .map(|(_, minutes)| *minutes)
            .ok_or_else(|| PredictionError::Model {
                message: format!("no estimate for distance {}", features.distance_km),
            })
    }
}

/// Predictor that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingPredictor;

impl TravelTimePredictor for FailingPredictor {
    fn predict(&self, _features: &TravelFeatures) -> Result<f64, PredictionError> {
        Err(PredictionError::Model {
            message: "model unavailable".to_owned(),
        })
    }
}

/// Predictor wrapper counting how often the model is consulted.
#[derive(Debug, Default)]
pub struct CountingPredictor<P> {
    inner: P,
    calls: AtomicU64,
}

impl<P> CountingPredictor<P> {
    /// Wrap `inner` with a zeroed counter.
    pub const fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicU64::new(0),
        }
    }

    /// Number of `predict` calls seen so far.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<P> TravelTimePredictor for CountingPredictor<P>
where
    P: TravelTimePredictor,
{
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.predict(features)
    }
}
