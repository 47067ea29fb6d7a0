//! Common types used across the console.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Cluster Types** - Records reported by the gateway API
//! - **API Types** - Request/response envelopes
//! - **Error Types** - Console error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Cluster Types
// =============================================================================

/// File name as listed by the gateway. Unique within one poll's file set.
pub type FileName = String;

/// One line of the gateway's operator log, oldest first.
pub type LogLine = String;

/// A storage node as reported by `GET /status`.
///
/// Identity is the `name`; records are replaced wholesale on every poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Unique, stable node name
    pub name: String,
    /// Host the node listens on
    pub host: String,
    /// Port the node listens on, shown as reported (not range-checked)
    pub port: i64,
}

impl ServerRecord {
    /// `host:port` label shown under the node name.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the gateway served a read from.
///
/// Opaque display label. The console never derives it, it only renders
/// what the API returned and picks a colour for the cache-hit case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadSource(pub String);

impl ReadSource {
    /// Label the gateway uses when the read was served from its cache.
    pub const CACHE_HIT: &'static str = "CACHE HIT";

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_cache_hit(&self) -> bool {
        self.0 == Self::CACHE_HIT
    }

    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        if self.is_cache_hit() {
            "source-cache-hit"
        } else {
            "source-server"
        }
    }
}

impl fmt::Display for ReadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time result of reading one file.
///
/// Not refreshed by polling; only an explicit re-read replaces it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFileDetail {
    pub filename: FileName,
    pub content: String,
    pub source: ReadSource,
}

// =============================================================================
// API Types
// =============================================================================

/// Response of `GET /status`. Extra keys (e.g. `status`) are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub servers: Option<Vec<ServerRecord>>,
}

/// Response of `GET /files`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilesResponse {
    #[serde(default)]
    pub files: Option<Vec<FileName>>,
}

/// Response of `GET /logs`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Option<Vec<LogLine>>,
}

/// Body of `POST /files`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WriteRequest<'a> {
    pub filename: &'a str,
    pub content: &'a str,
}

// =============================================================================
// Error Types
// =============================================================================

/// Console errors.
///
/// Unified error type for every gateway call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    /// Transport failed before a response arrived.
    Network(String),
    /// No response within the configured timeout (milliseconds).
    Timeout(u32),
    /// Non-success status; `body` is the response text as sent.
    Http { status: u16, body: String },
    /// Response body was not the expected JSON.
    Decode(String),
    /// Request rejected before it was sent.
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Timeout(ms) => write!(f, "Request timed out after {} ms", ms),
            AppError::Http { status, body } if body.is_empty() => write!(f, "HTTP {}", status),
            AppError::Http { body, .. } => f.write_str(body),
            AppError::Decode(msg) => write!(f, "Malformed response: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for console operations.
pub type AppResult<T> = Result<T, AppError>;
