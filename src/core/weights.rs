use crate::core::error::ScoringError;
use crate::core::signals::Signal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Allowed drift of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight applied to each signal
///
/// Weights sum to 1.0 so the composite stays within 0-100. Deserializing
/// requires every field; there is no default-filling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub rating: f64,
    pub experience: f64,
    pub feedback_count: f64,
    pub sentiment: f64,
    pub specialty_match: f64,
}

impl ScoreWeights {
    /// Weights in use while sentiment is inactive
    pub const CURRENT: ScoreWeights = ScoreWeights {
        rating: 0.40,
        experience: 0.30,
        feedback_count: 0.20,
        sentiment: 0.00,
        specialty_match: 0.10,
    };

    /// Weights once sentiment analysis is enabled
    pub const FUTURE: ScoreWeights = ScoreWeights {
        rating: 0.30,
        experience: 0.25,
        feedback_count: 0.15,
        sentiment: 0.20,
        specialty_match: 0.10,
    };

    #[inline]
    pub fn get(&self, signal: Signal) -> f64 {
        match signal {
            Signal::Rating => self.rating,
            Signal::Experience => self.experience,
            Signal::FeedbackCount => self.feedback_count,
            Signal::Sentiment => self.sentiment,
            Signal::SpecialtyMatch => self.specialty_match,
        }
    }

    pub fn sum(&self) -> f64 {
        Signal::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Build and validate weights from a signal name -> weight mapping
    ///
    /// Every signal must be present and no unknown names are accepted.
    pub fn from_map(map: &HashMap<String, f64>) -> Result<Self, ScoringError> {
        if let Some(unknown) = map.keys().find(|k| Signal::from_name(k).is_none()) {
            return Err(ScoringError::UnknownSignal(unknown.clone()));
        }

        let lookup = |signal: Signal| {
            map.get(signal.name())
                .copied()
                .ok_or_else(|| ScoringError::MissingWeight(signal.name().to_string()))
        };

        let weights = Self {
            rating: lookup(Signal::Rating)?,
            experience: lookup(Signal::Experience)?,
            feedback_count: lookup(Signal::FeedbackCount)?,
            sentiment: lookup(Signal::Sentiment)?,
            specialty_match: lookup(Signal::SpecialtyMatch)?,
        };

        weights.validate()?;
        Ok(weights)
    }

    /// Check each weight is in [0, 1] and that they sum to 1.0
    pub fn validate(&self) -> Result<(), ScoringError> {
        for signal in Signal::ALL {
            let weight = self.get(signal);
            if !(0.0..=1.0).contains(&weight) {
                return Err(ScoringError::WeightOutOfRange {
                    signal: signal.name().to_string(),
                    weight,
                });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::WeightsDoNotSumToOne(sum));
        }

        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::CURRENT
    }
}

/// Named weight preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightPreset {
    Current,
    Future,
}

impl WeightPreset {
    pub fn for_sentiment(include_sentiment: bool) -> Self {
        if include_sentiment {
            WeightPreset::Future
        } else {
            WeightPreset::Current
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        match self {
            WeightPreset::Current => ScoreWeights::CURRENT,
            WeightPreset::Future => ScoreWeights::FUTURE,
        }
    }
}

/// Weights chosen for one scoring call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weighting {
    Preset(WeightPreset),
    Custom(ScoreWeights),
}

impl Weighting {
    /// Explicit weights win; otherwise the preset follows the sentiment flag
    pub fn resolve(weights: Option<&ScoreWeights>, include_sentiment: bool) -> Self {
        match weights {
            Some(w) => Weighting::Custom(*w),
            None => Weighting::Preset(WeightPreset::for_sentiment(include_sentiment)),
        }
    }

    pub fn weights(&self) -> ScoreWeights {
        match self {
            Weighting::Preset(preset) => preset.weights(),
            Weighting::Custom(weights) => *weights,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weighting::Preset(WeightPreset::Current) => "current",
            Weighting::Preset(WeightPreset::Future) => "future",
            Weighting::Custom(_) => "custom",
        }
    }
}
