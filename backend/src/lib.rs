//! # DFS Gateway - development API for the cluster console
//!
//! Serves the HTTP API the console polls, over an in-memory stand-in for
//! the cluster client. Useful for running the console locally and for
//! integration tests; it implements no replication or quorum logic.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────────┐
//! │   Console   │────▶│  axum API   │────▶│    ClusterClient     │
//! │   (WASM)    │◀────│   (/api)    │◀────│ primary copies/cache │
//! └─────────────┘     └─────────────┘     └──────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`topology`] - Nodes and file → primary mapping
//! - [`cluster`] - Simulated cluster client
//! - [`api`] - HTTP API server

pub mod error;
pub mod topology;
pub mod cluster;
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{GatewayError, GatewayResult, TopologyError};
pub use topology::{NodeInfo, Topology, QUORUM_SIZE};
pub use cluster::{ClusterClient, ReadOutcome, ReadSource};
pub use api::{new_state, router, GatewayState, LogRing, MAX_LOG_LINES};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
