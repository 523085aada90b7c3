//! Error types for the heart-hands pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Core pipeline errors
#[derive(Error, Debug)]
pub enum HeartError {
    // Input errors
    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    #[error("Invalid hand: expected 21 landmarks, got {landmarks}")]
    InvalidHand { landmarks: usize },

    #[error("Unknown handedness label: {0:?}")]
    UnknownHandedness(String),

    // Precondition errors
    #[error("Need 2 hands (detected: {detected})")]
    NotEnoughHands { detected: usize },

    #[error("No auto-captured sample to label")]
    NoPendingCapture,

    // Artifact errors
    #[error("{what} not found at {}: {hint}", path.display())]
    MissingArtifact {
        what: &'static str,
        path: PathBuf,
        hint: &'static str,
    },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeartError {
    /// Whether the error only rejects a single user action.
    ///
    /// Recoverable errors leave the run loop alive; everything else ends it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            HeartError::NotEnoughHands { .. } | HeartError::NoPendingCapture
        )
    }
}

/// Result type for heart-hands operations
pub type HeartResult<T> = Result<T, HeartError>;
