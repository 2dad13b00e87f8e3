// Service exports
pub mod postgres;
pub mod predictor;

pub use postgres::{PostgresClient, PostgresError};
pub use predictor::{Prediction, PredictorClient, PredictorError};
