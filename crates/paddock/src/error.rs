//! Error types for paddock.
//!
//! This module defines all error types used throughout the paddock crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for paddock operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Calculation Errors ===
    /// A ratio was requested against a baseline that is zero or negative.
    #[error("cannot compute {quantity}: baseline emissions are not positive")]
    ZeroBaseline {
        /// The quantity that needed the baseline.
        quantity: &'static str,
    },

    // === Chart Errors ===
    /// Rendering a chart failed.
    #[error("failed to render chart {path}: {message}")]
    ChartRender {
        /// Path of the chart being written.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for paddock operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Create a chart rendering error for the given output path.
    #[must_use]
    pub fn chart(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ChartRender {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error comes from a zero or negative baseline.
    #[must_use]
    pub fn is_zero_baseline(&self) -> bool {
        matches!(self, Self::ZeroBaseline { .. })
    }
}
