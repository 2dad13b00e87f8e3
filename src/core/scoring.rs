use crate::core::signals::{default_extractors, bounded, ScoringContext, Signal, SignalExtractor};
use crate::core::weights::{ScoreWeights, Weighting};
use crate::models::Doctor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Round to 2 decimal places for display
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One signal's share of the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalScore {
    pub raw_score: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

/// Per-signal entries of a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub rating: SignalScore,
    pub experience: SignalScore,
    pub feedback_count: SignalScore,
    pub sentiment: SignalScore,
    pub specialty_match: SignalScore,
}

impl ScoreComponents {
    pub fn get(&self, signal: Signal) -> &SignalScore {
        match signal {
            Signal::Rating => &self.rating,
            Signal::Experience => &self.experience,
            Signal::FeedbackCount => &self.feedback_count,
            Signal::Sentiment => &self.sentiment,
            Signal::SpecialtyMatch => &self.specialty_match,
        }
    }
}

/// Detailed view of a composite score, for admin display and debugging
///
/// Entries are rounded for display; `total_score` is rounded once from the
/// unrounded sum and so may differ from the sum of the rounded entries by a
/// cent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_score: f64,
    pub components: ScoreComponents,
    pub weights_used: String,
}

/// Computes composite doctor scores from the five signal extractors
///
/// A `Scorer` holds no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Scorer {
    extractors: [Arc<dyn SignalExtractor>; 5],
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            extractors: default_extractors(),
        }
    }

    /// Replace the extractor for the signal it reports
    pub fn with_extractor(mut self, extractor: Arc<dyn SignalExtractor>) -> Self {
        let index = extractor.signal().index();
        self.extractors[index] = extractor;
        self
    }

    /// Composite score (0-100), rounded to 2 decimals
    ///
    /// Without explicit `weights` the future preset is used when
    /// `include_sentiment` is set, the current preset otherwise.
    pub fn calculate_score(
        &self,
        doctor: &Doctor,
        predicted_specialty: Option<&str>,
        weights: Option<&ScoreWeights>,
        include_sentiment: bool,
    ) -> f64 {
        let weights = Weighting::resolve(weights, include_sentiment).weights();
        round2(self.composite(doctor, predicted_specialty, &weights, include_sentiment))
    }

    /// Breakdown using the preset selected by `include_sentiment`
    pub fn get_detailed_scores(
        &self,
        doctor: &Doctor,
        predicted_specialty: Option<&str>,
        include_sentiment: bool,
    ) -> ScoreBreakdown {
        self.get_detailed_scores_with(
            doctor,
            predicted_specialty,
            Weighting::resolve(None, include_sentiment),
            include_sentiment,
        )
    }

    /// Breakdown with an explicit weighting
    pub fn get_detailed_scores_with(
        &self,
        doctor: &Doctor,
        predicted_specialty: Option<&str>,
        weighting: Weighting,
        include_sentiment: bool,
    ) -> ScoreBreakdown {
        let weights = weighting.weights();
        let raw = self.raw_scores(doctor, predicted_specialty, include_sentiment);
        let total = weighted_total(&raw, &weights);

        let entry = |signal: Signal| {
            let raw_score = raw[signal.index()];
            let weight = weights.get(signal);
            SignalScore {
                raw_score: round2(raw_score),
                weight,
                weighted_score: round2(raw_score * weight),
            }
        };

        ScoreBreakdown {
            total_score: round2(total),
            components: ScoreComponents {
                rating: entry(Signal::Rating),
                experience: entry(Signal::Experience),
                feedback_count: entry(Signal::FeedbackCount),
                sentiment: entry(Signal::Sentiment),
                specialty_match: entry(Signal::SpecialtyMatch),
            },
            weights_used: weighting.label().to_string(),
        }
    }

    /// Unrounded composite score, used for ordering
    pub fn composite(
        &self,
        doctor: &Doctor,
        predicted_specialty: Option<&str>,
        weights: &ScoreWeights,
        include_sentiment: bool,
    ) -> f64 {
        let raw = self.raw_scores(doctor, predicted_specialty, include_sentiment);
        weighted_total(&raw, weights)
    }

    /// Bounded raw score per signal, indexed by [`Signal`]
    ///
    /// Sentiment is only extracted when enabled and is 0 otherwise.
    fn raw_scores(
        &self,
        doctor: &Doctor,
        predicted_specialty: Option<&str>,
        include_sentiment: bool,
    ) -> [f64; 5] {
        let ctx = ScoringContext {
            doctor,
            predicted_specialty,
        };

        let mut raw = [0.0; 5];
        for signal in Signal::ALL {
            if signal == Signal::Sentiment && !include_sentiment {
                continue;
            }
            raw[signal.index()] = bounded(self.extractors[signal.index()].extract(&ctx));
        }
        raw
    }
}

#[inline]
fn weighted_total(raw: &[f64; 5], weights: &ScoreWeights) -> f64 {
    Signal::ALL
        .iter()
        .map(|signal| raw[signal.index()] * weights.get(*signal))
        .sum()
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Composite score with the built-in extractors
pub fn calculate_score(
    doctor: &Doctor,
    predicted_specialty: Option<&str>,
    weights: Option<&ScoreWeights>,
    include_sentiment: bool,
) -> f64 {
    Scorer::new().calculate_score(doctor, predicted_specialty, weights, include_sentiment)
}

/// Score breakdown with the built-in extractors
pub fn get_detailed_scores(
    doctor: &Doctor,
    predicted_specialty: Option<&str>,
    include_sentiment: bool,
) -> ScoreBreakdown {
    Scorer::new().get_detailed_scores(doctor, predicted_specialty, include_sentiment)
}
