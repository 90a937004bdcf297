//! Held-out accuracy of a travel-time predictor.

use courier_core::{PredictionError, TravelTimePredictor};
use serde::{Deserialize, Serialize};

use crate::TrainingSample;

/// Accuracy of a predictor over a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean absolute error in minutes.
    pub mae: f64,
    /// Root mean squared error in minutes.
    pub rmse: f64,
    /// Number of samples scored.
    pub samples: usize,
}

/// Score `predictor` against the observed minutes of `samples`.
///
/// An empty sample set scores zero error.
///
/// # Errors
/// Propagates the first [`PredictionError`] raised by `predictor`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "error metrics average residuals over the sample count"
)]
pub fn evaluate<P>(
    predictor: &P,
    samples: &[TrainingSample],
) -> Result<EvaluationReport, PredictionError>
where
    P: TravelTimePredictor + ?Sized,
{
    let mut absolute = 0.0;
    let mut squared = 0.0;
    for sample in samples {
        let residual = predictor.predict(&sample.features)? - sample.minutes;
        absolute += residual.abs();
        squared += residual * residual;
    }
    if samples.is_empty() {
        return Ok(EvaluationReport {
            mae: 0.0,
            rmse: 0.0,
            samples: 0,
        });
    }
    let count = samples.len() as f64;
    Ok(EvaluationReport {
        mae: absolute / count,
        rmse: (squared / count).sqrt(),
        samples: samples.len(),
    })
}
