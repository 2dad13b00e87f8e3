use crate::models::{ApprovalStatus, Doctor, FeedbackStats};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Doctor columns plus feedback aggregates, grouped per doctor
const DOCTOR_SELECT: &str = r#"
    SELECT
        d.id,
        d.first_name,
        d.last_name,
        d.specialty,
        d.years_of_experience,
        d.sentiment_score,
        d.sentiment_updated_at,
        d.approval_status,
        d.is_blocked,
        COUNT(f.id) AS feedback_count,
        AVG(f.rating)::float8 AS avg_rating
    FROM doctors d
    LEFT JOIN feedback f ON f.doctor_id = d.id
"#;

/// Read-only PostgreSQL client over the platform's doctor and feedback tables
///
/// The schema is owned by the booking platform; this client never writes.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a client whose pool opens connections on first use
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Load the candidate pool for a specialty
    ///
    /// Approved, unblocked doctors whose specialty matches case-insensitively,
    /// in creation order. Feedback count and mean rating come from the same
    /// grouped query, so aggregation is done once for the whole batch.
    pub async fn candidate_pool(&self, specialty: &str) -> Result<Vec<Doctor>, PostgresError> {
        let query = format!(
            r#"{DOCTOR_SELECT}
            WHERE LOWER(d.specialty) = LOWER($1)
              AND d.approval_status = $2
              AND d.is_blocked = FALSE
            GROUP BY d.id
            ORDER BY d.created_at, d.id
            "#
        );

        let rows = sqlx::query(&query)
            .bind(specialty)
            .bind(ApprovalStatus::Approved.as_str())
            .fetch_all(&self.pool)
            .await?;
        let doctors: Vec<Doctor> = rows.iter().map(doctor_from_row).collect();

        tracing::debug!("Loaded {} candidates for specialty {}", doctors.len(), specialty);

        Ok(doctors)
    }

    /// Load a single doctor with its feedback aggregates
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, PostgresError> {
        let query = format!(
            r#"{DOCTOR_SELECT}
            WHERE d.id = $1
            GROUP BY d.id
            "#
        );

        let row = sqlx::query(&query)
            .bind(doctor_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Doctor {} not found", doctor_id)))?;

        Ok(doctor_from_row(&row))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn doctor_from_row(row: &PgRow) -> Doctor {
    let approval: String = row.get("approval_status");
    let approval_status = ApprovalStatus::from_db(&approval).unwrap_or_else(|| {
        tracing::warn!("Unknown approval status {:?}, treating as pending", approval);
        ApprovalStatus::Pending
    });

    let years: Option<i32> = row.get("years_of_experience");
    let sentiment: Option<f64> = row.get("sentiment_score");
    let feedback_count: i64 = row.get("feedback_count");

    Doctor {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        specialty: row.get("specialty"),
        years_of_experience: years.map(|y| y.max(0) as u32),
        sentiment_score: sentiment.unwrap_or(0.0),
        sentiment_updated_at: row.get("sentiment_updated_at"),
        approval_status,
        is_blocked: row.get("is_blocked"),
        feedback: FeedbackStats {
            count: feedback_count.max(0) as u64,
            average_rating: row.get("avg_rating"),
        },
    }
}
