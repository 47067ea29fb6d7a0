//! REST API types for the console.
//!
//! Shapes match what the console deserializes; collections are always
//! present so clients never have to default them.

use serde::{Deserialize, Serialize};

use crate::cluster::ReadOutcome;
use crate::topology::NodeInfo;

/// `GET /api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"Online"` while the gateway answers
    pub status: String,
    pub servers: Vec<NodeInfo>,
}

/// `GET /api/files`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

/// `GET /api/logs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<String>,
}

/// `GET /api/files/{filename}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResponse {
    pub filename: String,
    pub content: String,
    /// `"CACHE HIT"` or `"SERVER"`
    pub source: String,
}

impl ReadResponse {
    pub fn new(filename: impl Into<String>, outcome: ReadOutcome) -> Self {
        Self {
            filename: filename.into(),
            content: outcome.content,
            source: outcome.source.as_str().to_string(),
        }
    }
}

/// `POST /api/files` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteRequest {
    pub filename: String,
    pub content: String,
}

/// `POST /api/files` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteResponse {
    pub status: String,
    pub message: String,
}

impl WriteResponse {
    pub fn committed() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Write committed".to_string(),
        }
    }
}
