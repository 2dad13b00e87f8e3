use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;
use crate::models::domain::Doctor;

/// Request to predict a specialty from symptoms and rank its doctors
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictSpecialistRequest {
    #[validate(length(min = 1, message = "Please provide a list of symptoms"))]
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// Query for the by-specialty listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BySpecialtyQuery {
    pub specialty: Option<String>,
    /// Overrides the configured sentiment switch when present
    #[serde(default)]
    #[serde(alias = "include_sentiment", rename = "includeSentiment")]
    pub include_sentiment: Option<bool>,
}

/// Query for a single doctor's score breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdownQuery {
    #[serde(alias = "predicted_specialty", rename = "predictedSpecialty")]
    pub predicted_specialty: Option<String>,
    /// Overrides the configured sentiment switch when present
    #[serde(default)]
    #[serde(alias = "include_sentiment", rename = "includeSentiment")]
    pub include_sentiment: Option<bool>,
}

/// Request to rank a caller-supplied candidate pool
///
/// Each doctor must carry its pre-computed feedback stats.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankDoctorsRequest {
    #[validate(length(min = 1))]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    #[serde(alias = "predicted_specialty", rename = "predictedSpecialty")]
    pub predicted_specialty: Option<String>,
    /// Explicit signal name -> weight mapping; must name all five signals
    #[serde(default)]
    pub weights: Option<HashMap<String, f64>>,
    /// Overrides the configured sentiment switch when present
    #[serde(default)]
    #[serde(alias = "include_sentiment", rename = "includeSentiment")]
    pub include_sentiment: Option<bool>,
}
