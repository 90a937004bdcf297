//! Seeded synthetic logistics datasets.

use courier_core::{EdgeRecord, TimeOfDay};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::DataError;

/// Shape of a synthetic dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticConfig {
    /// Number of records to emit.
    pub num_records: usize,
    /// Number of distinct locations records are drawn between.
    pub num_locations: usize,
    /// Seed for the deterministic generator.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            num_records: 200,
            num_locations: 20,
            seed: 42,
        }
    }
}

/// Name of the `index`th synthetic location.
#[must_use]
pub fn location_name(index: usize) -> String {
    format!("Location_{index:03}")
}

/// Draw `config.num_records` random records between distinct locations.
///
/// Each record links two different locations chosen uniformly and carries a
/// distance in `[50, 1000)` km, an integer demand in `[10, 100)`, a fuel cost
/// in `[0.1, 0.3)` per km, a traffic factor in `[1.0, 2.5)` and a uniformly
/// chosen time of day. The same config always yields the same records.
///
/// # Errors
/// Returns [`DataError::NotEnoughLocations`] when fewer than two locations
/// are requested.
pub fn generate_records(config: &SyntheticConfig) -> Result<Vec<EdgeRecord>, DataError> {
    if config.num_locations < 2 {
        return Err(DataError::NotEnoughLocations {
            requested: config.num_locations,
        });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let records = (0..config.num_records)
        .map(|_| {
            let (start, end) = distinct_pair(&mut rng, config.num_locations);
            random_record(&mut rng, location_name(start), location_name(end))
        })
        .collect();
    Ok(records)
}

/// Two different indices below `count`, which must be at least two.
fn distinct_pair(rng: &mut ChaCha8Rng, count: usize) -> (usize, usize) {
    let first = rng.gen_range(0..count);
    let second = rng.gen_range(0..count.saturating_sub(1));
    if second >= first {
        (first, second.saturating_add(1))
    } else {
        (first, second)
    }
}

/// Record between `start` and `end` with simulated demand, cost, traffic and
/// time of day.
fn random_record(rng: &mut ChaCha8Rng, start: String, end: String) -> EdgeRecord {
    let distance_km = rng.gen_range(50.0..1000.0);
    simulated_link(rng, start, end, distance_km)
        .with_delivery_demand(f64::from(rng.gen_range(10_u32..100)))
}

/// Record of known length whose fuel cost, traffic and time of day are
/// simulated.
pub(crate) fn simulated_link(
    rng: &mut ChaCha8Rng,
    start: String,
    end: String,
    distance_km: f64,
) -> EdgeRecord {
    let fuel_cost_per_km = rng.gen_range(0.1..0.3);
    let traffic_factor = rng.gen_range(1.0..2.5);
    let time_of_day = TimeOfDay::ALL.choose(rng).copied().unwrap_or_default();
    EdgeRecord::new(start, end, distance_km, time_of_day.as_str())
        .with_fuel_cost_per_km(fuel_cost_per_km)
        .with_traffic_factor(traffic_factor)
}
