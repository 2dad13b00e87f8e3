use serde::{Deserialize, Serialize};
use crate::models::domain::RankedDoctor;

/// Response for the predict-specialist endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictSpecialistResponse {
    pub predicted_specialist: Option<String>,
    pub recognized_symptoms: Vec<String>,
    pub unrecognized_symptoms: Vec<String>,
    pub ranked_doctors: Vec<RankedDoctor>,
    pub total_doctors_found: usize,
}

/// Response for ranking a caller-supplied pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankDoctorsResponse {
    pub ranked_doctors: Vec<RankedDoctor>,
    pub total_doctors_found: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
