use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong outside of the per-frame arithmetic.
///
/// Load faults are fatal at startup. Predictor and telemetry faults are
/// recoverable: callers log them and keep the frame going.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse settings from {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("could not load difficulty model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("difficulty predictor failed: {0}")]
    Predictor(String),

    #[error("difficulty predictor returned an unusable speed: {0}")]
    InvalidPrediction(f64),

    #[error("telemetry write to {path} failed: {source}")]
    Telemetry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
