//! In-memory stand-in for the cluster client behind the gateway.
//!
//! Writes go to the file's primary node; reads are served from a local
//! cache when possible and from the primary otherwise. A write invalidates
//! the cached copy. Nothing is replicated: this only reproduces what the
//! console can observe through the API.

use std::collections::HashMap;

use crate::api::logs::LogRing;
use crate::error::{GatewayError, GatewayResult};
use crate::topology::{Topology, QUORUM_SIZE};

/// Where a read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSource {
    CacheHit,
    Server,
}

impl ReadSource {
    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadSource::CacheHit => "CACHE HIT",
            ReadSource::Server => "SERVER",
        }
    }
}

/// Content of a successful read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub content: String,
    pub source: ReadSource,
}

/// Cluster client state: per-file primary copies, a read cache, and the
/// operator log.
#[derive(Debug)]
pub struct ClusterClient {
    topology: Topology,
    primary_copies: HashMap<String, String>,
    cache: HashMap<String, String>,
    logs: LogRing,
}

impl ClusterClient {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            primary_copies: HashMap::new(),
            cache: HashMap::new(),
            logs: LogRing::new(),
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn log(&mut self, message: impl AsRef<str>) {
        self.logs.log(message);
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.lines()
    }

    /// Read `filename`, preferring the cache.
    pub fn read(&mut self, filename: &str) -> GatewayResult<ReadOutcome> {
        let outcome = if let Some(content) = self.cache.get(filename) {
            ReadOutcome { content: content.clone(), source: ReadSource::CacheHit }
        } else {
            if self.topology.primary_for(filename).is_none() {
                return Err(GatewayError::NotFound(filename.to_string()));
            }
            let content = self
                .primary_copies
                .get(filename)
                .cloned()
                .ok_or_else(|| GatewayError::NotFound(filename.to_string()))?;
            self.cache.insert(filename.to_string(), content.clone());
            ReadOutcome { content, source: ReadSource::Server }
        };

        self.logs.log(format!("Read {} from {}", filename, outcome.source.as_str()));
        Ok(outcome)
    }

    /// Write `content` to the primary of `filename`.
    pub fn write(&mut self, filename: &str, content: &str) -> GatewayResult<()> {
        let Some(primary) = self.topology.primary_for(filename) else {
            let err = GatewayError::UnknownFile(filename.to_string());
            self.logs.log(format!("Write Failed: {} - {}", filename, err));
            return Err(err);
        };
        println!(
            "   write {} -> primary {} (quorum {})",
            filename, primary.name, QUORUM_SIZE
        );

        self.primary_copies.insert(filename.to_string(), content.to_string());
        if self.cache.remove(filename).is_some() {
            self.logs.log(format!("Cache Invalidated: {}", filename));
        }
        self.logs.log(format!("Wrote {} (Quorum Met)", filename));
        Ok(())
    }
}
