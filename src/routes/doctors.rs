use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Ranker, ScoreWeights};
use crate::models::{
    BySpecialtyQuery, ErrorResponse, HealthResponse, PredictSpecialistRequest,
    PredictSpecialistResponse, RankDoctorsRequest, RankDoctorsResponse, ScoreBreakdownQuery,
};
use crate::services::{PostgresClient, PostgresError, PredictorClient, PredictorError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub predictor: Arc<PredictorClient>,
    pub ranker: Ranker,
}

/// Configure all doctor ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/doctors/by-specialty", web::get().to(doctors_by_specialty))
        .route("/doctors/rank", web::post().to(rank_doctors))
        .route("/doctors/{doctor_id}/score-breakdown", web::get().to(score_breakdown))
        .route("/predict-specialist", web::post().to(predict_specialist));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Ranked doctors for a specialty
///
/// GET /api/v1/doctors/by-specialty?specialty=Cardiologist
///
/// Returns every approved, unblocked doctor of the specialty, best first.
async fn doctors_by_specialty(
    state: web::Data<AppState>,
    query: web::Query<BySpecialtyQuery>,
) -> impl Responder {
    let specialty = match query.specialty.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Missing specialty parameter",
                "specialty parameter is required",
                400,
            ));
        }
    };

    let pool = match state.postgres.candidate_pool(specialty).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to load doctors for {}: {}", specialty, e);
            return postgres_error_response("Failed to load doctors", e);
        }
    };

    let include_sentiment = query.include_sentiment.unwrap_or(state.ranker.include_sentiment());
    let result = state
        .ranker
        .rank_with(pool, Some(specialty), None, include_sentiment);

    tracing::info!(
        "Returning {} ranked doctors for specialty {}",
        result.doctors.len(),
        specialty
    );

    HttpResponse::Ok().json(result.doctors)
}

/// Rank a caller-supplied pool
///
/// POST /api/v1/doctors/rank
///
/// Request body:
/// ```json
/// {
///   "doctors": [{"id": "...", "specialty": "...", "feedback": {"count": 2, "average_rating": 4.5}}],
///   "predictedSpecialty": "Cardiologist",
///   "weights": {"rating": 0.4, "experience": 0.3, "feedback_count": 0.2, "sentiment": 0.0, "specialty_match": 0.1},
///   "includeSentiment": false
/// }
/// ```
async fn rank_doctors(
    state: web::Data<AppState>,
    req: web::Json<RankDoctorsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let req = req.into_inner();

    let weights = match req.weights.as_ref().map(ScoreWeights::from_map).transpose() {
        Ok(weights) => weights,
        Err(e) => {
            tracing::info!("Rejected ranking request with invalid weights: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid weights",
                e.to_string(),
                400,
            ));
        }
    };

    let result = state.ranker.rank_with(
        req.doctors,
        req.predicted_specialty.as_deref(),
        weights.as_ref(),
        req.include_sentiment.unwrap_or(state.ranker.include_sentiment()),
    );

    HttpResponse::Ok().json(RankDoctorsResponse {
        total_doctors_found: result.doctors.len(),
        ranked_doctors: result.doctors,
    })
}

/// Score breakdown for one doctor
///
/// GET /api/v1/doctors/{doctor_id}/score-breakdown?predictedSpecialty=Cardiologist
async fn score_breakdown(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ScoreBreakdownQuery>,
) -> impl Responder {
    let doctor_id = path.into_inner();

    let doctor = match state.postgres.get_doctor(&doctor_id).await {
        Ok(doctor) => doctor,
        Err(e) => return postgres_error_response("Failed to load doctor", e),
    };

    let include_sentiment = query.include_sentiment.unwrap_or(state.ranker.include_sentiment());
    let breakdown = state.ranker.scorer().get_detailed_scores_with(
        &doctor,
        query.predicted_specialty.as_deref(),
        state.ranker.weighting(include_sentiment),
        include_sentiment,
    );

    tracing::debug!("Score breakdown for {}: {:?}", doctor_id, breakdown);

    HttpResponse::Ok().json(breakdown)
}

/// Predict a specialty from symptoms and rank its doctors
///
/// POST /api/v1/predict-specialist
///
/// Request body:
/// ```json
/// {
///   "symptoms": ["chills", "vomiting", "high_fever", "abdominal_pain"]
/// }
/// ```
async fn predict_specialist(
    state: web::Data<AppState>,
    req: web::Json<PredictSpecialistRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let prediction = match state.predictor.predict(&req.symptoms).await {
        Ok(prediction) => prediction,
        Err(e) => {
            tracing::error!("Specialty prediction failed: {}", e);
            return predictor_error_response(e);
        }
    };

    // Ranking failures do not fail the prediction
    let ranked_doctors = match prediction.specialty() {
        Some(specialty) => match state.postgres.candidate_pool(specialty).await {
            Ok(pool) => state.ranker.rank(pool, Some(specialty)).doctors,
            Err(e) => {
                tracing::warn!("Failed to fetch ranked doctors for {}: {}", specialty, e);
                vec![]
            }
        },
        None => vec![],
    };

    tracing::info!(
        "Predicted {:?} with {} ranked doctors",
        prediction.specialty(),
        ranked_doctors.len()
    );

    HttpResponse::Ok().json(PredictSpecialistResponse {
        total_doctors_found: ranked_doctors.len(),
        predicted_specialist: prediction.specialty().map(str::to_string),
        recognized_symptoms: prediction.recognized_symptoms,
        unrecognized_symptoms: prediction.unrecognized_symptoms,
        ranked_doctors,
    })
}

fn postgres_error_response(context: &str, err: PostgresError) -> HttpResponse {
    let status = match err {
        PostgresError::NotFound(_) => StatusCode::NOT_FOUND,
        PostgresError::SqlxError(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    HttpResponse::build(status).json(ErrorResponse::new(context, err.to_string(), status.as_u16()))
}

/// Map predictor failures onto the status the client should see
pub fn predictor_error_status(err: &PredictorError) -> StatusCode {
    match err {
        PredictorError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PredictorError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        PredictorError::Rejected { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        PredictorError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        PredictorError::RequestError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn predictor_error_response(err: PredictorError) -> HttpResponse {
    let status = predictor_error_status(&err);
    let message = match &err {
        PredictorError::Rejected { message, .. } => message.clone(),
        other => other.to_string(),
    };

    HttpResponse::build(status).json(ErrorResponse::new(
        "Failed to get prediction",
        message,
        status.as_u16(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predictor_error_status() {
        assert_eq!(
            predictor_error_status(&PredictorError::Unavailable("refused".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(predictor_error_status(&PredictorError::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            predictor_error_status(&PredictorError::Rejected {
                status: 400,
                message: "No valid symptoms recognized".into(),
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = postgres_error_response("Failed", PostgresError::NotFound("x".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
