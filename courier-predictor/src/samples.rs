//! Training samples and seeded train/test splits.

use courier_core::{EdgeAttributes, EdgeRecord, TravelFeatures};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::SampleError;

/// One labelled observation: link features and the minutes the trip took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    /// Predictor inputs.
    pub features: TravelFeatures,
    /// Observed travel time in minutes.
    pub minutes: f64,
}

/// Travel time recorded for a link: its distance stretched by traffic.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "travel time scales distance by the traffic factor"
)]
pub fn target_minutes(edge: &EdgeAttributes) -> f64 {
    edge.distance_km * edge.traffic_factor
}

/// Label every record with its [`target_minutes`], using the record's own
/// time of day as a feature.
///
/// # Errors
/// Returns [`SampleError::InvalidRecord`] for the first record that would be
/// rejected by the graph builder.
pub fn samples_from_records(records: &[EdgeRecord]) -> Result<Vec<TrainingSample>, SampleError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let edge = EdgeAttributes::from_record(record)
                .map_err(|defect| SampleError::InvalidRecord { index, defect })?;
            Ok(TrainingSample {
                features: TravelFeatures::for_edge(&edge, edge.time_of_day),
                minutes: target_minutes(&edge),
            })
        })
        .collect()
}

/// Samples partitioned for fitting and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<T> {
    /// Samples to fit on.
    pub train: Vec<T>,
    /// Held-out samples.
    pub test: Vec<T>,
}

/// Shuffle `samples` with a generator seeded by `seed` and hold out
/// `ceil(len × test_fraction)` of them.
///
/// # Errors
/// Returns [`SampleError::InvalidTestFraction`] unless
/// `0 <= test_fraction < 1`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "held-out count is a rounded-up fraction of the sample count"
)]
pub fn train_test_split<T>(
    mut samples: Vec<T>,
    test_fraction: f64,
    seed: u64,
) -> Result<Split<T>, SampleError> {
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(SampleError::InvalidTestFraction {
            fraction: test_fraction,
        });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    samples.shuffle(&mut rng);
    let held_out = ((samples.len() as f64) * test_fraction).ceil() as usize;
    let test = samples.split_off(samples.len().saturating_sub(held_out));
    Ok(Split {
        train: samples,
        test,
    })
}
