//! Caching wrapper around a [`TravelTimePredictor`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::TimeOfDay;

use super::error::PredictionError;
use super::provider::{TravelFeatures, TravelTimePredictor};

/// Exact bit patterns of a feature vector; `-0.0` and `0.0` are distinct.
type FeatureKey = (u64, u64, u64, TimeOfDay);

fn key(features: &TravelFeatures) -> FeatureKey {
    (
        features.distance_km.to_bits(),
        features.delivery_demand.to_bits(),
        features.traffic_factor.to_bits(),
        features.time_of_day,
    )
}

/// Predictor that remembers every successful estimate it has produced.
///
/// Failed predictions are not cached, so a transient model error is retried
/// on the next call. Scope one instance to a search (or a batch of searches
/// over the same graph) and drop it afterwards.
///
/// # Examples
/// ```
/// use courier_core::{
///     MemoizedPredictor, PredictionError, TimeOfDay, TravelFeatures, TravelTimePredictor,
/// };
///
/// struct Slow;
///
/// impl TravelTimePredictor for Slow {
///     fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
///         Ok(features.distance_km * 2.0)
///     }
/// }
///
/// let cached = MemoizedPredictor::new(Slow);
/// let features = TravelFeatures {
///     distance_km: 3.0,
///     delivery_demand: 0.0,
///     traffic_factor: 1.0,
///     time_of_day: TimeOfDay::Morning,
/// };
/// assert_eq!(cached.predict(&features)?, 6.0);
/// assert_eq!(cached.predict(&features)?, 6.0);
/// assert_eq!((cached.hits(), cached.misses()), (1, 1));
/// # Ok::<(), PredictionError>(())
/// ```
#[derive(Debug)]
pub struct MemoizedPredictor<P> {
    inner: P,
    cache: Mutex<HashMap<FeatureKey, f64>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P> MemoizedPredictor<P> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Number of predictions answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of predictions forwarded to the wrapped model.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Forget every cached estimate.
    ///
    /// A cache poisoned by a panicking caller is emptied and made usable
    /// again.
    pub fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.cache.clear_poison();
    }

    /// Return the wrapped predictor.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P> TravelTimePredictor for MemoizedPredictor<P>
where
    P: TravelTimePredictor,
{
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
        let lookup = key(features);
        let poisoned = || PredictionError::Model {
            message: "prediction cache lock poisoned".to_owned(),
        };
        if let Some(cached) = self
            .cache
            .lock()
            .map_err(|_| poisoned())?
            .get(&lookup)
            .copied()
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(cached);
        }
        // The lock is released while the model runs.
        let estimate = self.inner.predict(features)?;
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.cache
            .lock()
            .map_err(|_| poisoned())?
            .insert(lookup, estimate);
        Ok(estimate)
    }
}
