use crate::flow::renumber;
use crate::heuristics::is_os_default_dir;
use crate::parser::split_path_list;
use crate::postprocess::{reconcile_with, DirProber};
use lspath_types::{
    AnalysisResult, ConfigNode, PathEntry, StartupMode, SESSION_NODE_ID, SESSION_SOURCE, SYSTEM_NODE_ID,
    SYSTEM_SOURCE,
};
use std::collections::HashMap;
use tracing::debug;

const SESSION_NOTE: &str = "Added manually or by runtime tool (not in shell config)";

/// Merge a sandboxed trace model with the PATH the user actually has.
///
/// The live PATH decides which directories exist and in what order; the
/// trace supplies attribution. Directories the trace cannot explain are
/// credited to the system node when they are well-known OS defaults (or
/// listed in `extra_system_dirs`), otherwise to the session node.
pub fn unify(
    live_path: &str,
    trace: AnalysisResult,
    extra_system_dirs: &[String],
    prober: &impl DirProber,
) -> AnalysisResult {
    let AnalysisResult {
        path_entries: traced,
        flow_nodes: mut nodes,
        ..
    } = trace;

    let mut consumed = vec![false; traced.len()];
    let mut entries: Vec<PathEntry> = Vec::new();
    let (mut from_system, mut from_session) = (0usize, 0usize);

    for dir in split_path_list(live_path) {
        let unconsumed = (0..traced.len()).find(|&t| !consumed[t] && traced[t].value == dir);
        if let Some(t) = unconsumed {
            consumed[t] = true;
        }

        // A live repeat beyond what the trace produced keeps the first attribution
        let matched = unconsumed.or_else(|| traced.iter().position(|e| e.value == dir));

        let entry = match matched {
            Some(t) => {
                let mut entry = traced[t].clone();
                entry.clear_derived();
                entry
            }
            None if is_os_default_dir(dir) || extra_system_dirs.iter().any(|d| d == dir) => {
                from_system += 1;
                PathEntry::new(dir, SYSTEM_SOURCE, 0, StartupMode::System, SYSTEM_NODE_ID)
            }
            None => {
                from_session += 1;
                let mut entry = PathEntry::new(dir, SESSION_SOURCE, 0, StartupMode::Session, SESSION_NODE_ID);
                entry.is_session_only = true;
                entry.session_note = Some(SESSION_NOTE.to_string());
                entry
            }
        };
        entries.push(entry);
    }

    debug!(
        live = entries.len(),
        traced = traced.len(),
        from_system,
        from_session,
        "unified live PATH with trace"
    );

    let system_needed = entries.iter().any(|e| e.flow_id == SYSTEM_NODE_ID);
    place_system_first(&mut nodes, system_needed);

    if from_session > 0 {
        let at = usize::from(nodes.first().is_some_and(ConfigNode::is_system));
        nodes.insert(at, ConfigNode::session());
    }

    reattach_entries(&mut nodes, &entries);
    renumber(&mut nodes);
    reconcile_with(&mut entries, prober);

    AnalysisResult {
        path_entries: entries,
        flow_nodes: nodes,
        diagnostics: Vec::new(),
    }
}

/// The system node leads the timeline whenever it exists.
fn place_system_first(nodes: &mut Vec<ConfigNode>, needed: bool) {
    match nodes.iter().position(ConfigNode::is_system) {
        Some(0) => {}
        Some(pos) => {
            let system = nodes.remove(pos);
            nodes.insert(0, system);
        }
        None if needed => nodes.insert(0, ConfigNode::system()),
        None => {}
    }
}

/// Rebuild every node's entry list against the unified indices.
///
/// Copied entries carry their original `flow_id`, so this preserves each
/// node's contribution without a separate index remap.
fn reattach_entries(nodes: &mut [ConfigNode], entries: &[PathEntry]) {
    let by_id: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    for node in nodes.iter_mut() {
        node.entries.clear();
    }
    for (idx, entry) in entries.iter().enumerate() {
        if let Some(&pos) = by_id.get(&entry.flow_id) {
            nodes[pos].entries.push(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::FsProber;

    fn traced(entries: Vec<PathEntry>, nodes: Vec<ConfigNode>) -> AnalysisResult {
        AnalysisResult {
            path_entries: entries,
            flow_nodes: nodes,
            diagnostics: Vec::new(),
        }
    }

    fn zprofile_trace() -> AnalysisResult {
        traced(
            vec![
                PathEntry::new("/usr/bin", SYSTEM_SOURCE, 0, StartupMode::System, SYSTEM_NODE_ID),
                PathEntry::new("/opt/tool", "/etc/zprofile", 5, StartupMode::Login, "node-1"),
            ],
            vec![ConfigNode::system(), ConfigNode::new("node-1", "/etc/zprofile", 2, 0)],
        )
    }

    #[test]
    fn test_live_order_wins() {
        let result = unify("/opt/tool:/usr/bin", zprofile_trace(), &[], &FsProber);
        let values: Vec<_> = result.path_entries.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["/opt/tool", "/usr/bin"]);
        assert_eq!(result.path_entries[0].location(), "/etc/zprofile:5");
        assert_eq!(result.node("node-1").unwrap().entries, vec![0]);
        assert_eq!(result.node(SYSTEM_NODE_ID).unwrap().entries, vec![1]);
    }

    #[test]
    fn test_os_default_is_credited_to_system() {
        let result = unify("/usr/local/bin:/usr/bin", zprofile_trace(), &[], &FsProber);
        let local = &result.path_entries[0];
        assert_eq!(local.source_file, SYSTEM_SOURCE);
        assert!(!local.is_session_only);
        assert_eq!(result.flow_nodes[0].entries, vec![0, 1]);
        assert!(result.node(SESSION_NODE_ID).is_none());
    }

    #[test]
    fn test_extra_system_dirs_extend_allow_list() {
        let extra = vec!["/nix/var/profiles/default/bin".to_string()];
        let result = unify("/nix/var/profiles/default/bin", zprofile_trace(), &extra, &FsProber);
        assert_eq!(result.path_entries[0].mode, StartupMode::System);
    }

    #[test]
    fn test_unknown_dir_is_session_only_and_session_node_follows_system() {
        let result = unify("/home/me/venv/bin:/usr/bin:/opt/tool", zprofile_trace(), &[], &FsProber);

        let venv = &result.path_entries[0];
        assert!(venv.is_session_only);
        assert_eq!(venv.flow_id, SESSION_NODE_ID);
        assert_eq!(venv.session_note.as_deref(), Some(SESSION_NOTE));

        let ids: Vec<_> = result.flow_nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![SYSTEM_NODE_ID, SESSION_NODE_ID, "node-1"]);
        let orders: Vec<_> = result.flow_nodes.iter().map(|n| n.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_system_node_created_when_trace_had_none() {
        let trace = traced(
            vec![PathEntry::new("/opt/tool", "/etc/zprofile", 5, StartupMode::Login, "node-1")],
            vec![ConfigNode::new("node-1", "/etc/zprofile", 1, 0)],
        );
        let result = unify("/bin:/opt/tool:/tmp/x", trace, &[], &FsProber);

        let ids: Vec<_> = result.flow_nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec![SYSTEM_NODE_ID, SESSION_NODE_ID, "node-1"]);
    }

    #[test]
    fn test_live_repeats_consume_trace_matches() {
        let trace = traced(
            vec![
                PathEntry::new("/a", "/etc/zprofile", 1, StartupMode::Login, "node-1"),
                PathEntry::new("/a", "/home/me/.zshrc", 3, StartupMode::Interactive, "node-2"),
            ],
            vec![
                ConfigNode::new("node-1", "/etc/zprofile", 1, 0),
                ConfigNode::new("node-2", "/home/me/.zshrc", 2, 0),
            ],
        );
        let result = unify("/a:/a:/a", trace, &[], &FsProber);

        assert_eq!(result.path_entries[0].location(), "/etc/zprofile:1");
        assert_eq!(result.path_entries[1].location(), "/home/me/.zshrc:3");
        assert_eq!(result.path_entries[2].location(), "/etc/zprofile:1");
        assert_eq!(result.path_entries[1].duplicate_of, Some(0));
        assert_eq!(result.path_entries[2].duplicate_of, Some(0));
        assert!(result.path_entries.iter().all(|e| !e.is_session_only));
    }
}
