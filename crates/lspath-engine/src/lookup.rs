use lspath_core::expand_tilde;
use lspath_types::AnalysisResult;
use serde::Serialize;
use std::collections::HashSet;
use walkdir::WalkDir;

/// Where a command name resolves within one PATH directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandMatch {
    /// Index of the PATH entry that holds the file
    pub index: usize,
    pub directory: String,
    pub file_name: String,
    /// True when the name equals the query rather than just starting with it
    pub exact: bool,
}

/// Candidates for `query` in PATH priority order, one per distinct directory.
///
/// Matching is case-insensitive on the file name prefix; within a directory
/// an exact name beats a longer one. The first result is what the shell
/// would run for an exact query.
pub fn which(result: &AnalysisResult, query: &str) -> Vec<CommandMatch> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut visited = HashSet::new();
    let mut matches = Vec::new();

    for (index, entry) in result.path_entries.iter().enumerate() {
        let dir = expand_tilde(&entry.value);
        if !visited.insert(dir.clone()) {
            continue;
        }

        let candidates = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| name.to_lowercase().starts_with(&query));

        let mut best: Option<String> = None;
        for name in candidates {
            if name.to_lowercase() == query {
                best = Some(name);
                break;
            }
            best.get_or_insert(name);
        }

        if let Some(file_name) = best {
            matches.push(CommandMatch {
                index,
                directory: entry.value.clone(),
                exact: file_name.to_lowercase() == query,
                file_name,
            });
        }
    }

    matches
}
