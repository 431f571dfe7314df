use crate::{ConfigNode, PathEntry};
use serde::{Deserialize, Serialize};

/// Frozen output of one analysis run, handed to every presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub path_entries: Vec<PathEntry>,
    pub flow_nodes: Vec<ConfigNode>,
    pub diagnostics: Vec<String>,
}

impl AnalysisResult {
    pub fn node(&self, id: &str) -> Option<&ConfigNode> {
        self.flow_nodes.iter().find(|n| n.id == id)
    }

    /// Entries owned by a node, in PATH priority order.
    pub fn entries_of<'a>(&'a self, node: &'a ConfigNode) -> impl Iterator<Item = &'a PathEntry> + 'a {
        node.entries
            .iter()
            .filter_map(move |&idx| self.path_entries.get(idx))
    }

    /// The PATH string this result describes.
    pub fn joined_path(&self) -> String {
        self.path_entries
            .iter()
            .map(|e| e.value.as_str())
            .collect::<Vec<_>>()
            .join(":")
    }
}
