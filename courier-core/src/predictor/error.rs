use thiserror::Error;

/// Errors from [`crate::predictor::TravelTimePredictor::predict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// The underlying model failed to produce an estimate.
    #[error("model failed: {message}")]
    Model {
        /// Description supplied by the model.
        message: String,
    },
    /// A feature value could not be fed to the model.
    ///
    /// Models reject NaN and infinite inputs rather than guessing.
    #[error("feature {feature} is not a finite number")]
    NonFiniteFeature {
        /// Name of the offending feature.
        feature: &'static str,
    },
}
