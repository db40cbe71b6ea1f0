//! Error types for RepSense

use thiserror::Error;

use crate::Joint;

/// Core RepSense errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepsenseError {
    // Control boundary errors
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Frame buffer size mismatch: expected {expected} bytes, got {actual}")]
    InvalidFrame { expected: usize, actual: usize },

    // Perception errors
    #[error("Landmark not available: {0:?}")]
    MissingLandmark(Joint),

    #[error("No body detected")]
    BodyAbsent,
}

/// Result type for RepSense operations
pub type RepsenseResult<T> = Result<T, RepsenseError>;
