//! Error types for the churn pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Model is not fitted")]
    ModelNotFitted,

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("Dataset must contain both classes: {0}")]
    ClassImbalance(String),

    #[error("Unknown label contract: {0}")]
    UnknownContract(String),
}

pub type Result<T> = std::result::Result<T, ChurnError>;
