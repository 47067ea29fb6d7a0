//! Gateway communication services.
//!
//! # Services
//!
//! - [`api`] - HTTP client for the gateway API ([`ClusterApi`])
//! - [`notify`] - Operator-facing alerts ([`Notifier`])

pub mod api;
pub mod notify;

pub use api::*;
pub use notify::*;
