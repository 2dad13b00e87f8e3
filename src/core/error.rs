use thiserror::Error;

/// Errors raised when a weight configuration cannot be used for scoring
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Missing weight for signal: {0}")]
    MissingWeight(String),

    #[error("Unknown signal in weights: {0}")]
    UnknownSignal(String),

    #[error("Weight for {signal} must be within [0, 1], got {weight}")]
    WeightOutOfRange { signal: String, weight: f64 },

    #[error("Weights must sum to 1.0, got {0}")]
    WeightsDoNotSumToOne(f64),
}
