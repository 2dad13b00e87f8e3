use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the specialty predictor
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("ML prediction service is not available: {0}")]
    Unavailable(String),

    #[error("ML prediction service timed out")]
    Timeout,

    #[error("Prediction rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    RequestError(reqwest::Error),
}

impl From<reqwest::Error> for PredictorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PredictorError::Timeout
        } else if err.is_connect() {
            PredictorError::Unavailable(err.to_string())
        } else {
            PredictorError::RequestError(err)
        }
    }
}

/// Specialty predicted for a set of symptoms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// `None` when the classifier could not settle on a specialty
    #[serde(default)]
    pub predicted_specialist: Option<String>,
    #[serde(default)]
    pub recognized_symptoms: Vec<String>,
    #[serde(default)]
    pub unrecognized_symptoms: Vec<String>,
}

impl Prediction {
    /// Predicted specialty, ignoring blank values
    pub fn specialty(&self) -> Option<&str> {
        self.predicted_specialist
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize)]
struct PredictPayload<'a> {
    symptoms: &'a [String],
}

/// Client for the external symptom classifier
///
/// The classifier fuzzy-matches tokens against its vocabulary and answers
/// 400 when none are recognized.
pub struct PredictorClient {
    url: String,
    client: Client,
}

impl PredictorClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PredictorError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Predict a specialty for the given symptom tokens
    pub async fn predict(&self, symptoms: &[String]) -> Result<Prediction, PredictorError> {
        tracing::debug!("Requesting prediction for {} symptoms from {}", symptoms.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&PredictPayload { symptoms })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or_else(|| "ML API error".to_string());

            return Err(rejection(status, message));
        }

        let prediction: Prediction = response
            .json()
            .await
            .map_err(|e| PredictorError::InvalidResponse(e.to_string()))?;

        tracing::info!(
            "Predicted {:?} ({} recognized, {} unrecognized)",
            prediction.specialty(),
            prediction.recognized_symptoms.len(),
            prediction.unrecognized_symptoms.len()
        );

        Ok(prediction)
    }
}

fn rejection(status: StatusCode, message: String) -> PredictorError {
    PredictorError::Rejected {
        status: status.as_u16(),
        message,
    }
}
