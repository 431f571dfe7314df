//! Custom assertions for lspath-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Entry order and attribution checks
//! - Duplicate and symlink relations
//! - Flow timeline coverage of canonical startup files

use anyhow::{Context, Result};
use lspath_types::{AnalysisResult, PathEntry, ShellFamily};

fn find_entry<'a>(result: &'a AnalysisResult, value: &str) -> Result<(usize, &'a PathEntry)> {
    result
        .path_entries
        .iter()
        .enumerate()
        .find(|(_, e)| e.value == value)
        .with_context(|| format!("PATH entry {} not found in {}", value, result.joined_path()))
}

/// Assert the final PATH is exactly `expected`, in order.
pub fn assert_entry_values(result: &AnalysisResult, expected: &[&str]) -> Result<()> {
    let actual: Vec<&str> = result.path_entries.iter().map(|e| e.value.as_str()).collect();
    if actual != expected {
        anyhow::bail!("Expected PATH {:?}, got {:?}", expected, actual);
    }
    Ok(())
}

/// Assert the first entry with `value` is credited to `file:line`.
pub fn assert_attributed(result: &AnalysisResult, value: &str, file: &str, line: u32) -> Result<()> {
    let (idx, entry) = find_entry(result, value)?;
    if entry.source_file != file || entry.line_number != line {
        anyhow::bail!(
            "Entry #{} ({}) attributed to {}, expected {}:{}",
            idx + 1,
            value,
            entry.location(),
            file,
            line
        );
    }
    Ok(())
}

/// Assert entry `idx` is a duplicate of entry `of`.
pub fn assert_duplicate_of(result: &AnalysisResult, idx: usize, of: usize) -> Result<()> {
    let entry = result
        .path_entries
        .get(idx)
        .with_context(|| format!("No PATH entry at index {}", idx))?;

    if !entry.is_duplicate || entry.duplicate_of != Some(of) {
        anyhow::bail!(
            "Entry #{} ({}) is_duplicate={} duplicate_of={:?}, expected duplicate of {}",
            idx + 1,
            entry.value,
            entry.is_duplicate,
            entry.duplicate_of,
            of
        );
    }
    Ok(())
}

/// Assert every entry's `flow_id` names a node that lists it.
pub fn assert_flow_consistent(result: &AnalysisResult) -> Result<()> {
    for (idx, entry) in result.path_entries.iter().enumerate() {
        let node = result
            .node(&entry.flow_id)
            .with_context(|| format!("Entry #{} references unknown node {}", idx + 1, entry.flow_id))?;
        if !node.entries.contains(&idx) {
            anyhow::bail!("Node {} does not list entry #{}", node.id, idx + 1);
        }
    }

    for (i, node) in result.flow_nodes.iter().enumerate() {
        if node.order != i + 1 {
            anyhow::bail!("Node {} has order {}, expected {}", node.id, node.order, i + 1);
        }
    }
    Ok(())
}

/// Assert every canonical startup file of `family` appears in the timeline,
/// either as a real node or as a placeholder, and no placeholder is repeated.
pub fn assert_canonical_coverage(result: &AnalysisResult, family: ShellFamily) -> Result<()> {
    for file in family.canonical_files() {
        let nodes: Vec<_> = result
            .flow_nodes
            .iter()
            .filter(|n| file.matches(&n.file_path))
            .collect();

        if nodes.is_empty() {
            anyhow::bail!("Canonical file {} missing from flow", file.display_path());
        }
        let ghosts = nodes.iter().filter(|n| n.not_executed).count();
        if ghosts > 1 || (ghosts == 1 && nodes.len() > 1) {
            anyhow::bail!(
                "Canonical file {} represented {} times ({} placeholders)",
                file.display_path(),
                nodes.len(),
                ghosts
            );
        }
    }
    Ok(())
}
