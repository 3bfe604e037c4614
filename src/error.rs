//! Error types for the NFL projection aggregation CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProjError>;

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid threshold {name}: {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Invalid confidence level: {value} (must be strictly between 0.0 and 1.0)")]
    InvalidConfidenceLevel { value: f64 },

    #[error("Unknown combination method: {method}")]
    InvalidMethod { method: String },

    #[error("Unknown merge strategy: {strategy}")]
    InvalidStrategy { strategy: String },

    #[error("Invalid weight spec: {spec} (expected source_N=WEIGHT)")]
    InvalidWeight { spec: String },
}
