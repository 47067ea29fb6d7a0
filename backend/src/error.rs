//! Error types for the development gateway.
//!
//! - [`TopologyError`] - invalid node/file layout
//! - [`GatewayError`] - request-level failures, rendered as HTTP responses
//!
//! Error bodies follow the `{"detail": "<message>"}` shape the console
//! surfaces verbatim.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// =============================================================================
// Topology Errors
// =============================================================================

/// Errors in the configured cluster layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyError {
    /// Two nodes share a name.
    #[error("Duplicate node name: {0}")]
    DuplicateNode(String),

    /// A file maps to a node that does not exist.
    #[error("File '{file}' maps to unknown node '{node}'")]
    UnknownPrimary { file: String, node: String },

    /// The layout file is not valid JSON or has the wrong shape.
    #[error("Invalid topology file: {0}")]
    Parse(String),
}

// =============================================================================
// Gateway Errors
// =============================================================================

/// Request-level gateway errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Write to a file with no primary mapping.
    #[error("Unknown file")]
    UnknownFile(String),

    /// Read of a file that is unmapped or was never written.
    #[error("File not found or error")]
    NotFound(String),

    /// Request body rejected.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Listener or socket failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad layout at startup.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::UnknownFile(_) | GatewayError::Io(_) | GatewayError::Topology(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
