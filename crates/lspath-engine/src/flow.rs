use crate::heuristics::is_canonical_config;
use lspath_types::{ConfigNode, PathEntry, ShellFamily};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Turn the raw node sequence into the displayed timeline.
///
/// Entries are attributed to their owning nodes, empty non-canonical nodes
/// are dropped, adjacent nodes for the same file are merged (redirecting
/// `flow_id` of the merged entries), placeholders are injected for canonical
/// files that never ran, and `order` is renumbered 1..N.
pub fn build_flow_graph(raw_nodes: Vec<ConfigNode>, entries: &mut [PathEntry]) -> Vec<ConfigNode> {
    let attributed = attribute_entries(raw_nodes, entries);
    let coalesced = coalesce(attributed, entries);

    let family = ShellFamily::from_file_names(
        coalesced
            .iter()
            .filter(|n| !n.not_executed)
            .map(|n| n.file_path.as_str()),
    );
    debug!(shell = %family, nodes = coalesced.len(), "injecting unexecuted startup files");

    let mut nodes = inject_missing(coalesced, family);
    renumber(&mut nodes);
    nodes
}

pub(crate) fn renumber(nodes: &mut [ConfigNode]) {
    for (i, node) in nodes.iter_mut().enumerate() {
        node.order = i + 1;
    }
}

fn attribute_entries(mut nodes: Vec<ConfigNode>, entries: &[PathEntry]) -> Vec<ConfigNode> {
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

    nodes
        .into_iter()
        .filter(|n| !n.entries.is_empty() || is_canonical_config(&n.file_path))
        .collect()
}

fn coalesce(nodes: Vec<ConfigNode>, entries: &mut [PathEntry]) -> Vec<ConfigNode> {
    let mut kept: Vec<ConfigNode> = Vec::with_capacity(nodes.len());

    for node in nodes {
        if let Some(last) = kept.last_mut()
            && last.file_path == node.file_path
        {
            for &idx in &node.entries {
                entries[idx].flow_id = last.id.clone();
            }
            last.entries.extend(node.entries);
            last.entries.sort_unstable();
            continue;
        }
        kept.push(node);
    }

    kept
}

fn inject_missing(nodes: Vec<ConfigNode>, family: ShellFamily) -> Vec<ConfigNode> {
    let canonical = family.canonical_files();
    let present: HashSet<u8> = nodes
        .iter()
        .filter_map(|n| family.rank_of(&n.file_path))
        .collect();

    let mut result = Vec::with_capacity(nodes.len() + canonical.len());
    let mut cursor = 0;

    let ghost = |result: &mut Vec<ConfigNode>, idx: usize| {
        let file = &canonical[idx];
        if !present.contains(&file.rank) {
            result.push(ConfigNode::ghost(format!("ghost-{}", file.rank), file.display_path()));
        }
    };

    for node in nodes {
        if let Some(rank) = family.rank_of(&node.file_path) {
            while let Some(file) = canonical.get(cursor) {
                if file.rank < rank {
                    ghost(&mut result, cursor);
                    cursor += 1;
                } else {
                    if file.rank == rank {
                        cursor += 1;
                    }
                    // A lower rank sourced late does not rewind the walk
                    break;
                }
            }
        }
        result.push(node);
    }

    while cursor < canonical.len() {
        ghost(&mut result, cursor);
        cursor += 1;
    }

    result
}
