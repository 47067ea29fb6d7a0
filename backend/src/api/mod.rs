//! HTTP API module.
//!
//! This module provides the HTTP server and API types for the gateway.

pub mod server;
pub mod types;
pub mod logs;

pub use server::{new_state, router, start_server, GatewayState};
pub use types::*;
pub use logs::*;
