use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Admin approval state of a doctor account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Parse the value stored in the `approval_status` column
    pub fn from_db(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "pending" => Some(ApprovalStatus::Pending),
            "approved" => Some(ApprovalStatus::Approved),
            "rejected" => Some(ApprovalStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

/// Per-doctor aggregate over all feedback records
///
/// Computed once per batch (a grouped SQL query or [`aggregate_feedback`])
/// and attached to each doctor before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub count: u64,
    pub average_rating: Option<f64>,
}

impl FeedbackStats {
    /// Build stats from a list of ratings
    pub fn from_ratings(ratings: &[u8]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }

        let sum: u64 = ratings.iter().map(|&r| r as u64).sum();
        Self {
            count: ratings.len() as u64,
            average_rating: Some(sum as f64 / ratings.len() as f64),
        }
    }
}

/// A single patient review left after an appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub doctor_id: String,
    pub appointment_id: String,
    /// 1-5, enforced by the platform
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Aggregate feedback per doctor in a single pass
pub fn aggregate_feedback(feedback: &[Feedback]) -> HashMap<String, FeedbackStats> {
    let mut sums: HashMap<&str, (u64, u64)> = HashMap::new();

    for f in feedback {
        let entry = sums.entry(f.doctor_id.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += f.rating as u64;
    }

    sums.into_iter()
        .map(|(doctor_id, (count, total))| {
            (
                doctor_id.to_string(),
                FeedbackStats {
                    count,
                    average_rating: Some(total as f64 / count as f64),
                },
            )
        })
        .collect()
}

/// Doctor record as read from the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub specialty: String,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub sentiment_score: f64,
    #[serde(default)]
    pub sentiment_updated_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub feedback: FeedbackStats,
}

impl Doctor {
    /// Approved, unblocked doctor with no experience or feedback on record
    pub fn new(id: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            specialty: specialty.into(),
            years_of_experience: None,
            sentiment_score: 0.0,
            sentiment_updated_at: None,
            approval_status: ApprovalStatus::Approved,
            is_blocked: false,
            feedback: FeedbackStats::default(),
        }
    }

    pub fn with_experience(mut self, years: u32) -> Self {
        self.years_of_experience = Some(years);
        self
    }

    pub fn with_ratings(mut self, ratings: &[u8]) -> Self {
        self.feedback = FeedbackStats::from_ratings(ratings);
        self
    }

    pub fn with_sentiment(mut self, sentiment_score: f64) -> Self {
        self.sentiment_score = sentiment_score;
        self
    }
}

/// Doctor with its read-only ranking fields attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDoctor {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub ranking_score: f64,
    pub avg_rating: Option<f64>,
    pub total_feedback: u64,
}
