use crate::models::{Doctor, FeedbackStats};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Score given to doctors without any feedback yet
pub const NEUTRAL_RATING_SCORE: f64 = 50.0;

/// Top of the feedback rating scale
pub const MAX_RATING: f64 = 5.0;

/// Years of experience that earn a full experience score
pub const EXPERIENCE_CAP_YEARS: f64 = 20.0;

/// Review count that earns a full feedback-count score
pub const FEEDBACK_COUNT_CAP: f64 = 50.0;

/// One of the five sub-scores combined into the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Rating,
    Experience,
    FeedbackCount,
    Sentiment,
    SpecialtyMatch,
}

impl Signal {
    /// All signals in aggregation order
    pub const ALL: [Signal; 5] = [
        Signal::Rating,
        Signal::Experience,
        Signal::FeedbackCount,
        Signal::Sentiment,
        Signal::SpecialtyMatch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Signal::Rating => "rating",
            Signal::Experience => "experience",
            Signal::FeedbackCount => "feedback_count",
            Signal::Sentiment => "sentiment",
            Signal::SpecialtyMatch => "specialty_match",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Signal::ALL.into_iter().find(|s| s.name() == name)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs available to an extractor for a single doctor
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub doctor: &'a Doctor,
    pub predicted_specialty: Option<&'a str>,
}

/// Maps a doctor to a bounded 0-100 sub-score
///
/// Extractors must not fail: missing data resolves to a documented default.
/// Any extractor can be replaced on a [`Scorer`](crate::core::Scorer)
/// without touching aggregation.
pub trait SignalExtractor: fmt::Debug + Send + Sync {
    fn signal(&self) -> Signal;

    fn extract(&self, ctx: &ScoringContext<'_>) -> f64;
}

/// Clamp to 0-100, mapping NaN to 0
#[inline]
pub(crate) fn bounded(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Rating score (0-100) from the mean feedback rating on a 1-5 scale
///
/// Doctors with no feedback get a neutral 50.
#[inline]
pub fn rating_score(feedback: &FeedbackStats) -> f64 {
    match feedback.average_rating {
        Some(avg) if feedback.count > 0 => bounded(avg / MAX_RATING * 100.0),
        _ => NEUTRAL_RATING_SCORE,
    }
}

/// Experience score (0-100), linear up to 20 years
#[inline]
pub fn experience_score(years_of_experience: Option<u32>) -> f64 {
    let years = years_of_experience.unwrap_or(0) as f64;
    (years / EXPERIENCE_CAP_YEARS * 100.0).min(100.0)
}

/// Feedback-count score (0-100), linear up to 50 reviews
#[inline]
pub fn feedback_count_score(count: u64) -> f64 {
    (count as f64 / FEEDBACK_COUNT_CAP * 100.0).min(100.0)
}

/// Sentiment score (0-100) from the stored value
#[inline]
pub fn sentiment_score(stored: f64) -> f64 {
    bounded(stored)
}

/// 100 if the specialty matches the prediction (case-insensitive), else 0
#[inline]
pub fn specialty_match_score(specialty: &str, predicted_specialty: Option<&str>) -> f64 {
    match predicted_specialty {
        Some(predicted) if specialty.to_lowercase() == predicted.to_lowercase() => 100.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RatingExtractor;

impl SignalExtractor for RatingExtractor {
    fn signal(&self) -> Signal {
        Signal::Rating
    }

    fn extract(&self, ctx: &ScoringContext<'_>) -> f64 {
        rating_score(&ctx.doctor.feedback)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExperienceExtractor;

impl SignalExtractor for ExperienceExtractor {
    fn signal(&self) -> Signal {
        Signal::Experience
    }

    fn extract(&self, ctx: &ScoringContext<'_>) -> f64 {
        experience_score(ctx.doctor.years_of_experience)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackCountExtractor;

impl SignalExtractor for FeedbackCountExtractor {
    fn signal(&self) -> Signal {
        Signal::FeedbackCount
    }

    fn extract(&self, ctx: &ScoringContext<'_>) -> f64 {
        feedback_count_score(ctx.doctor.feedback.count)
    }
}

/// Reads `sentiment_score` off the doctor record
///
/// The field stays at 0 until a sentiment pipeline populates it from
/// feedback comments. Replace this extractor to plug in live analysis.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredSentimentExtractor;

impl SignalExtractor for StoredSentimentExtractor {
    fn signal(&self) -> Signal {
        Signal::Sentiment
    }

    fn extract(&self, ctx: &ScoringContext<'_>) -> f64 {
        sentiment_score(ctx.doctor.sentiment_score)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialtyMatchExtractor;

impl SignalExtractor for SpecialtyMatchExtractor {
    fn signal(&self) -> Signal {
        Signal::SpecialtyMatch
    }

    fn extract(&self, ctx: &ScoringContext<'_>) -> f64 {
        specialty_match_score(&ctx.doctor.specialty, ctx.predicted_specialty)
    }
}

/// Built-in extractors, indexed by [`Signal`]
pub fn default_extractors() -> [Arc<dyn SignalExtractor>; 5] {
    [
        Arc::new(RatingExtractor),
        Arc::new(ExperienceExtractor),
        Arc::new(FeedbackCountExtractor),
        Arc::new(StoredSentimentExtractor),
        Arc::new(SpecialtyMatchExtractor),
    ]
}
