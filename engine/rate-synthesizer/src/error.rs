//! Error types for the rate synthesizer boundary
//!
//! Synthesis itself is total; these cover roster loading, date ranges
//! and configuration.

use thiserror::Error;

/// Result type for rate synthesizer operations
pub type Result<T> = std::result::Result<T, SynthError>;

#[derive(Error, Debug)]
pub enum SynthError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate competitor id: {0}")]
    DuplicateCompetitor(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
