// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{aggregate_feedback, ApprovalStatus, Doctor, Feedback, FeedbackStats, RankedDoctor};
pub use requests::{BySpecialtyQuery, PredictSpecialistRequest, RankDoctorsRequest, ScoreBreakdownQuery};
pub use responses::{ErrorResponse, HealthResponse, PredictSpecialistResponse, RankDoctorsResponse};
