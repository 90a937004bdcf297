//! Linear travel-time regression over standardised link features.
//!
//! Each prediction evaluates a design row of [`FEATURE_COUNT`] columns:
//! an intercept, the four numeric features (distance, demand, traffic and
//! the distance × traffic interaction) centred and scaled by their training
//! mean and standard deviation, and one-hot time-of-day indicators with
//! `afternoon` as the reference category. Coefficients solve the ridge
//! normal equations `(XᵀX + λI) β = Xᵀy`, leaving the intercept unpenalised.

use courier_core::{PredictionError, TimeOfDay, TravelFeatures, TravelTimePredictor};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{FitError, TrainingSample};

/// Number of columns in a design row.
pub const FEATURE_COUNT: usize = 8;

/// Column names of a design row, in order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "intercept",
    "distance_km",
    "delivery_demand",
    "traffic_factor",
    "distance_x_traffic",
    "morning",
    "evening",
    "night",
];

/// Ridge strength used when callers have no preference.
pub const DEFAULT_RIDGE: f64 = 1e-6;

/// Smallest training set [`TrafficRegression::fit`] accepts.
pub const MIN_SAMPLES: usize = 2;

/// Columns that are standardised before fitting.
const NUMERIC_COLUMNS: std::ops::RangeInclusive<usize> = 1..=4;

/// Pivots smaller than this fraction of the largest diagonal entry count as
/// zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

type Row = [f64; FEATURE_COUNT];
type Matrix = [Row; FEATURE_COUNT];

/// Fitted linear model estimating link travel minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRegression {
    centres: Row,
    scales: Row,
    coefficients: Row,
}

impl TrafficRegression {
    /// Fit the model to `samples` with ridge strength `ridge`.
    ///
    /// A positive `ridge` keeps the system solvable when a category or a
    /// constant feature is absent from the training data.
    ///
    /// # Errors
    /// - [`FitError::NotEnoughSamples`] for fewer than [`MIN_SAMPLES`].
    /// - [`FitError::InvalidRidge`] for a negative or non-finite `ridge`.
    /// - [`FitError::NonFiniteSample`] when a feature or target is not finite.
    /// - [`FitError::Singular`] when the normal equations have no unique
    ///   solution.
    #[expect(
        clippy::float_arithmetic,
        clippy::indexing_slicing,
        reason = "normal equations accumulate fixed-size outer products"
    )]
    pub fn fit(samples: &[TrainingSample], ridge: f64) -> Result<Self, FitError> {
        if samples.len() < MIN_SAMPLES {
            return Err(FitError::NotEnoughSamples {
                required: MIN_SAMPLES,
                found: samples.len(),
            });
        }
        if !ridge.is_finite() || ridge < 0.0 {
            return Err(FitError::InvalidRidge { ridge });
        }
        if let Some(index) = samples
            .iter()
            .position(|s| s.features.ensure_finite().is_err() || !s.minutes.is_finite())
        {
            return Err(FitError::NonFiniteSample { index });
        }

        let raw: Vec<Row> = samples.iter().map(|s| design_row(&s.features)).collect();
        let (centres, scales) = column_statistics(&raw);
        let mut normal: Matrix = [[0.0; FEATURE_COUNT]; FEATURE_COUNT];
        let mut moment: Row = [0.0; FEATURE_COUNT];
        for (row, sample) in raw.iter().zip(samples) {
            let x = standardise(row, &centres, &scales);
            for i in 0..FEATURE_COUNT {
                for j in 0..FEATURE_COUNT {
                    normal[i][j] += x[i] * x[j];
                }
                moment[i] += x[i] * sample.minutes;
            }
        }
        for i in 1..FEATURE_COUNT {
            normal[i][i] += ridge;
        }

        let coefficients = solve(normal, moment).ok_or(FitError::Singular)?;
        debug!(
            "fitted travel-time regression on {} samples: {coefficients:?}",
            samples.len()
        );
        Ok(Self {
            centres,
            scales,
            coefficients,
        })
    }

    /// Coefficients in standardised feature space, ordered as
    /// [`FEATURE_NAMES`].
    #[must_use]
    pub const fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    /// Estimated minutes for `features`, never negative.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "prediction is a dot product of coefficients and features"
    )]
    pub fn predict_minutes(&self, features: &TravelFeatures) -> f64 {
        let x = standardise(&design_row(features), &self.centres, &self.scales);
        let estimate: f64 = x
            .iter()
            .zip(&self.coefficients)
            .map(|(value, weight)| value * weight)
            .sum();
        estimate.max(0.0)
    }

    /// Whether every stored parameter is finite.
    pub(crate) fn is_finite(&self) -> bool {
        self.centres
            .iter()
            .chain(&self.scales)
            .chain(&self.coefficients)
            .all(|value| value.is_finite())
            && self.scales.iter().all(|scale| *scale > 0.0)
    }
}

impl TravelTimePredictor for TrafficRegression {
    fn predict(&self, features: &TravelFeatures) -> Result<f64, PredictionError> {
        features.ensure_finite()?;
        Ok(self.predict_minutes(features))
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the interaction column multiplies distance by traffic"
)]
fn design_row(features: &TravelFeatures) -> Row {
    let indicator = |category: TimeOfDay| {
        if features.time_of_day == category {
            1.0
        } else {
            0.0
        }
    };
    [
        1.0,
        features.distance_km,
        features.delivery_demand,
        features.traffic_factor,
        features.distance_km * features.traffic_factor,
        indicator(TimeOfDay::Morning),
        indicator(TimeOfDay::Evening),
        indicator(TimeOfDay::Night),
    ]
}

/// Mean and population standard deviation of the numeric columns; other
/// columns keep centre 0 and scale 1, as do numeric columns with no spread.
#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    clippy::cast_precision_loss,
    reason = "column statistics average over the sample count"
)]
fn column_statistics(rows: &[Row]) -> (Row, Row) {
    let mut centres = [0.0; FEATURE_COUNT];
    let mut scales = [1.0; FEATURE_COUNT];
    let count = rows.len() as f64;
    for column in NUMERIC_COLUMNS {
        let mean = rows.iter().map(|row| row[column]).sum::<f64>() / count;
        let variance = rows
            .iter()
            .map(|row| (row[column] - mean).powi(2))
            .sum::<f64>()
            / count;
        centres[column] = mean;
        let spread = variance.sqrt();
        if spread > 0.0 && spread.is_finite() {
            scales[column] = spread;
        }
    }
    (centres, scales)
}

#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "element-wise standardisation of a fixed-size row"
)]
fn standardise(row: &Row, centres: &Row, scales: &Row) -> Row {
    let mut out = [0.0; FEATURE_COUNT];
    for i in 0..FEATURE_COUNT {
        out[i] = (row[i] - centres[i]) / scales[i];
    }
    out
}

/// Solve `matrix · x = rhs` by Gaussian elimination with partial pivoting.
/// Returns `None` when a pivot vanishes relative to the matrix scale.
#[expect(
    clippy::float_arithmetic,
    clippy::indexing_slicing,
    reason = "in-place elimination over a fixed-size system"
)]
fn solve(mut matrix: Matrix, mut rhs: Row) -> Option<Row> {
    let scale = (0..FEATURE_COUNT)
        .map(|i| matrix[i][i].abs())
        .fold(0.0, f64::max);
    let tolerance = scale * PIVOT_TOLERANCE;

    for col in 0..FEATURE_COUNT {
        let pivot = (col..FEATURE_COUNT)
            .max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))?;
        if matrix[pivot][col].abs() <= tolerance {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);
        for row in (col + 1)..FEATURE_COUNT {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..FEATURE_COUNT {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = [0.0; FEATURE_COUNT];
    for row in (0..FEATURE_COUNT).rev() {
        let tail: f64 = ((row + 1)..FEATURE_COUNT)
            .map(|k| matrix[row][k] * solution[k])
            .sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }
    solution.iter().all(|v| v.is_finite()).then_some(solution)
}
