//! Doctor Ranking - composite scoring and ranking of doctors for the healthcare platform
//!
//! This library provides the ranking engine used to recommend doctors for a
//! predicted specialty and to list a specialty's doctors by quality. Each
//! doctor is scored from five weighted signals (rating, experience, review
//! count, sentiment, specialty match) and the candidate pool is stably sorted
//! by the composite score.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_score, get_detailed_scores, Ranker, ScoreBreakdown, ScoreWeights, Scorer, WeightPreset};
pub use models::{Doctor, FeedbackStats, RankedDoctor};
