// Core ranking engine exports
pub mod error;
pub mod filters;
pub mod ranker;
pub mod scoring;
pub mod signals;
pub mod weights;

pub use error::ScoringError;
pub use filters::{filter_candidate_pool, is_eligible, matches_specialty};
pub use ranker::{Ranker, RankingResult};
pub use scoring::{calculate_score, get_detailed_scores, round2, ScoreBreakdown, ScoreComponents, Scorer, SignalScore};
pub use signals::{ScoringContext, Signal, SignalExtractor};
pub use weights::{ScoreWeights, WeightPreset, Weighting};
