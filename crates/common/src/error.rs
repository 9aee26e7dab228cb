//! Error types shared across Thermwatch crates.

use std::path::PathBuf;

/// Top-level error type for Thermwatch operations.
#[derive(Debug, thiserror::Error)]
pub enum ThermwatchError {
    #[error("Model error: {message}")]
    Model { message: String },

    #[error("Overlay error: {message}")]
    Overlay { message: String },

    #[error("Aggregation error: {message}")]
    Aggregation { message: String },

    #[error("Triage error: {message}")]
    Triage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using ThermwatchError.
pub type ThermwatchResult<T> = Result<T, ThermwatchError>;

impl ThermwatchError {
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model {
            message: msg.into(),
        }
    }

    pub fn overlay(msg: impl Into<String>) -> Self {
        Self::Overlay {
            message: msg.into(),
        }
    }

    pub fn aggregation(msg: impl Into<String>) -> Self {
        Self::Aggregation {
            message: msg.into(),
        }
    }

    pub fn triage(msg: impl Into<String>) -> Self {
        Self::Triage {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
