//! Cluster layout: storage nodes and the file → primary mapping.
//!
//! The default layout is three nodes on localhost with one primary per file.
//! Another layout can be loaded from a JSON file:
//!
//! ```json
//! {
//!   "servers": [{ "name": "New York", "host": "localhost", "port": 8000 }],
//!   "files": [{ "file": "file1.txt", "primary": "New York" }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayResult, TopologyError};

/// Number of acknowledgements a write needs, as reported to operators.
pub const QUORUM_SIZE: usize = 2;

/// A storage node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl NodeInfo {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self { name: name.into(), host: host.into(), port }
    }
}

/// One `files` entry of a layout file.
#[derive(Debug, Clone, Deserialize)]
struct FileEntry {
    file: String,
    primary: String,
}

/// On-disk layout, validated through [`Topology::new`].
#[derive(Debug, Clone, Deserialize)]
struct TopologyFile {
    servers: Vec<NodeInfo>,
    #[serde(default)]
    files: Vec<FileEntry>,
}

/// Nodes plus the ordered file → primary node mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    servers: Vec<NodeInfo>,
    file_primaries: Vec<(String, String)>,
}

impl Topology {
    /// Build a layout, rejecting duplicate nodes and dangling primaries.
    pub fn new(
        servers: Vec<NodeInfo>,
        file_primaries: Vec<(String, String)>,
    ) -> Result<Self, TopologyError> {
        let mut names = HashSet::new();
        for server in &servers {
            if !names.insert(server.name.as_str()) {
                return Err(TopologyError::DuplicateNode(server.name.clone()));
            }
        }
        for (file, node) in &file_primaries {
            if !names.contains(node.as_str()) {
                return Err(TopologyError::UnknownPrimary {
                    file: file.clone(),
                    node: node.clone(),
                });
            }
        }
        Ok(Self { servers, file_primaries })
    }

    /// Parse and validate a JSON layout.
    pub fn from_json(raw: &str) -> Result<Self, TopologyError> {
        let parsed: TopologyFile =
            serde_json::from_str(raw).map_err(|e| TopologyError::Parse(e.to_string()))?;
        let file_primaries = parsed
            .files
            .into_iter()
            .map(|entry| (entry.file, entry.primary))
            .collect();
        Self::new(parsed.servers, file_primaries)
    }

    /// Layout from `path`, or the default layout when no path is given.
    pub fn load(path: Option<&Path>) -> GatewayResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&raw)?)
    }

    pub fn servers(&self) -> &[NodeInfo] {
        &self.servers
    }

    /// File names in mapping order.
    pub fn files(&self) -> Vec<String> {
        self.file_primaries.iter().map(|(file, _)| file.clone()).collect()
    }

    /// Primary node for `file`, if the file is mapped.
    pub fn primary_for(&self, file: &str) -> Option<&NodeInfo> {
        let (_, node) = self.file_primaries.iter().find(|(f, _)| f == file)?;
        self.servers.iter().find(|s| &s.name == node)
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            servers: vec![
                NodeInfo::new("New York", "localhost", 8000),
                NodeInfo::new("Toronto", "localhost", 8001),
                NodeInfo::new("London", "localhost", 8002),
            ],
            file_primaries: vec![
                ("file1.txt".into(), "New York".into()),
                ("file2.txt".into(), "Toronto".into()),
                ("file3.txt".into(), "London".into()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GatewayError;

    const TWO_NODES: &str = r#"{
        "servers": [
            { "name": "Paris", "host": "10.0.0.5", "port": 9100 },
            { "name": "Berlin", "host": "10.0.0.6", "port": 9101 }
        ],
        "files": [
            { "file": "notes.txt", "primary": "Berlin" },
            { "file": "todo.txt", "primary": "Paris" }
        ]
    }"#;

    #[test]
    fn test_default_layout() {
        let topology = Topology::default();
        assert_eq!(topology.servers().len(), 3);
        assert_eq!(topology.files(), vec!["file1.txt", "file2.txt", "file3.txt"]);
        assert_eq!(topology.primary_for("file2.txt").unwrap().name, "Toronto");
        assert!(topology.primary_for("file9.txt").is_none());
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let err = Topology::new(
            vec![NodeInfo::new("a", "h", 1), NodeInfo::new("a", "h", 2)],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, TopologyError::DuplicateNode("a".into()));
    }

    #[test]
    fn test_dangling_primary_rejected() {
        let err = Topology::new(
            vec![NodeInfo::new("a", "h", 1)],
            vec![("f.txt".into(), "b".into())],
        )
        .unwrap_err();
        assert!(matches!(err, TopologyError::UnknownPrimary { .. }));
    }

    #[test]
    fn test_from_json_keeps_file_order() {
        let topology = Topology::from_json(TWO_NODES).unwrap();
        assert_eq!(topology.servers()[1], NodeInfo::new("Berlin", "10.0.0.6", 9101));
        assert_eq!(topology.files(), vec!["notes.txt", "todo.txt"]);
        assert_eq!(topology.primary_for("todo.txt").unwrap().name, "Paris");
    }

    #[test]
    fn test_from_json_validates_layout() {
        let raw = r#"{
            "servers": [{ "name": "Paris", "host": "h", "port": 1 }],
            "files": [{ "file": "a.txt", "primary": "Rome" }]
        }"#;
        assert_eq!(
            Topology::from_json(raw).unwrap_err(),
            TopologyError::UnknownPrimary { file: "a.txt".into(), node: "Rome".into() }
        );
        assert!(matches!(
            Topology::from_json(r#"{"files": []}"#),
            Err(TopologyError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file_and_default() {
        assert_eq!(Topology::load(None).unwrap(), Topology::default());

        let path = std::env::temp_dir().join(format!("dfs-topology-{}.json", std::process::id()));
        std::fs::write(&path, TWO_NODES).unwrap();
        let loaded = Topology::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap().files(), vec!["notes.txt", "todo.txt"]);

        let missing = Topology::load(Some(Path::new("/nonexistent/dfs-topology.json")));
        assert!(matches!(missing, Err(GatewayError::Io(_))));
    }

    #[test]
    fn test_load_reports_invalid_layout_as_topology_error() {
        let path = std::env::temp_dir().join(format!("dfs-bad-topology-{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        let loaded = Topology::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(loaded, Err(GatewayError::Topology(TopologyError::Parse(_)))));
    }
}
