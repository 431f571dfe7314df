use crate::diagnostics;
use crate::parser::split_path_list;
use crate::postprocess::{reconcile_with, DirProber};
use lspath_types::{AnalysisResult, ConfigNode, PathEntry, StartupMode, CURRENT_SESSION_SOURCE, SYSTEM_NODE_ID};

/// Describe the live PATH on its own, without any trace.
pub fn session_only(live_path: &str, prober: &impl DirProber) -> AnalysisResult {
    let mut entries: Vec<PathEntry> = split_path_list(live_path)
        .map(|dir| PathEntry::new(dir, CURRENT_SESSION_SOURCE, 0, StartupMode::Session, SYSTEM_NODE_ID))
        .collect();
    reconcile_with(&mut entries, prober);

    let mut node = ConfigNode::new(SYSTEM_NODE_ID, CURRENT_SESSION_SOURCE, 1, 0);
    node.entries = (0..entries.len()).collect();

    AnalysisResult {
        diagnostics: diagnostics::for_session(&entries),
        path_entries: entries,
        flow_nodes: vec![node],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::FsProber;

    #[test]
    fn test_single_node_owns_every_entry() {
        let result = session_only("/usr/bin::/bin:/usr/bin", &FsProber);
        assert_eq!(result.path_entries.len(), 3);
        assert_eq!(result.flow_nodes.len(), 1);
        assert_eq!(result.flow_nodes[0].entries, vec![0, 1, 2]);
        assert_eq!(result.flow_nodes[0].description, "Your current terminal session's PATH");
        assert_eq!(result.path_entries[2].duplicate_of, Some(0));
    }
}
