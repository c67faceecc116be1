//! Error types for the perfsim service
//!
//! Structured errors are defined with thiserror; anyhow is used for
//! propagation at the binary edge.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Main error type for perfsim operations
#[derive(Error, Debug)]
pub enum PerfsimError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be rendered as TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// A simulation task panicked or was cancelled
    #[error("Simulation task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type alias for perfsim operations
pub type Result<T> = std::result::Result<T, PerfsimError>;

impl IntoResponse for PerfsimError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
