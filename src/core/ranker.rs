use crate::core::error::ScoringError;
use crate::core::filters::filter_candidate_pool;
use crate::core::scoring::{round2, Scorer};
use crate::core::weights::{ScoreWeights, Weighting};
use crate::models::{Doctor, RankedDoctor};

/// Result of ranking a candidate pool
#[derive(Debug)]
pub struct RankingResult {
    pub doctors: Vec<RankedDoctor>,
    pub total_candidates: usize,
}

/// Orders a candidate pool by composite score
///
/// The whole pool is returned, highest score first. Ordering uses the
/// unrounded composite so display rounding never creates ties; equal scores
/// keep their input order.
#[derive(Debug, Clone)]
pub struct Ranker {
    scorer: Scorer,
    weights: Option<ScoreWeights>,
    include_sentiment: bool,
}

impl Ranker {
    /// `weights` of `None` selects a preset per call from `include_sentiment`
    pub fn new(
        scorer: Scorer,
        weights: Option<ScoreWeights>,
        include_sentiment: bool,
    ) -> Result<Self, ScoringError> {
        if let Some(weights) = &weights {
            weights.validate()?;
        }

        Ok(Self {
            scorer,
            weights,
            include_sentiment,
        })
    }

    pub fn with_default_weights() -> Self {
        Self {
            scorer: Scorer::new(),
            weights: None,
            include_sentiment: false,
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn include_sentiment(&self) -> bool {
        self.include_sentiment
    }

    /// Weighting this ranker applies when a call does not override it
    pub fn weighting(&self, include_sentiment: bool) -> Weighting {
        Weighting::resolve(self.weights.as_ref(), include_sentiment)
    }

    /// Rank a pre-filtered pool with the configured weights
    pub fn rank(&self, pool: Vec<Doctor>, predicted_specialty: Option<&str>) -> RankingResult {
        self.rank_with(pool, predicted_specialty, None, self.include_sentiment)
    }

    /// Rank a pre-filtered pool, optionally overriding weights and sentiment
    pub fn rank_with(
        &self,
        pool: Vec<Doctor>,
        predicted_specialty: Option<&str>,
        weights: Option<&ScoreWeights>,
        include_sentiment: bool,
    ) -> RankingResult {
        let total_candidates = pool.len();
        let weights = match weights {
            Some(w) => *w,
            None => self.weighting(include_sentiment).weights(),
        };

        let mut scored: Vec<(Doctor, f64)> = pool
            .into_iter()
            .map(|doctor| {
                let score = self.scorer.composite(
                    &doctor,
                    predicted_specialty,
                    &weights,
                    include_sentiment,
                );
                (doctor, score)
            })
            .collect();

        // Stable sort: ties keep pool order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let doctors: Vec<RankedDoctor> = scored
            .into_iter()
            .map(|(doctor, score)| RankedDoctor {
                ranking_score: round2(score),
                avg_rating: doctor.feedback.average_rating.map(round2),
                total_feedback: doctor.feedback.count,
                doctor,
            })
            .collect();

        tracing::debug!(
            "Ranked {} doctors for specialty {:?}",
            doctors.len(),
            predicted_specialty
        );

        RankingResult {
            doctors,
            total_candidates,
        }
    }

    /// Filter to approved, unblocked doctors of `specialty`, then rank them
    /// with `specialty` as the predicted specialty
    pub fn rank_for_specialty(&self, doctors: Vec<Doctor>, specialty: &str) -> RankingResult {
        let pool = filter_candidate_pool(doctors, specialty);
        self.rank(pool, Some(specialty))
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
