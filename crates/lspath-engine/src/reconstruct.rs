use crate::heuristics::{is_eval_with_substitution, is_noisy_internal_file, starts_top_level_context};
use crate::parser::split_path_list;
use lspath_types::{ConfigNode, PathEntry, StartupMode, TraceEvent, SYSTEM_NODE_ID, SYSTEM_SOURCE};
use std::collections::HashMap;
use tracing::debug;

/// Provisional model at the end of a trace: the raw node sequence and the
/// last PATH snapshot. Handed to the flow graph builder.
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    pub nodes: Vec<ConfigNode>,
    pub entries: Vec<PathEntry>,
}

/// Most recent `eval $(...)` seen in a file.
#[derive(Debug, Clone, Copy)]
struct EvalMark {
    line: u32,
    used: bool,
}

/// Replays trace events in order, tracking which file is being sourced and
/// how PATH evolves.
///
/// State depends on strict arrival order; feed events one at a time from a
/// single consumer.
pub struct Reconstructor {
    nodes: Vec<ConfigNode>,
    snapshot: Vec<PathEntry>,
    last_path: String,
    last_file: Option<String>,
    current_node: Option<String>,
    stack: Vec<String>,
    evals: HashMap<String, EvalMark>,
    counter: usize,
}

impl Reconstructor {
    /// Start from `baseline`, the PATH the traced shell inherited.
    ///
    /// A non-empty baseline is credited to the synthetic system node.
    pub fn new(baseline: &str) -> Self {
        let mut nodes = Vec::new();
        let mut snapshot = Vec::new();
        let mut current_node = None;

        if !baseline.is_empty() {
            nodes.push(ConfigNode::system());
            current_node = Some(SYSTEM_NODE_ID.to_string());
            snapshot = split_path_list(baseline)
                .map(|dir| PathEntry::new(dir, SYSTEM_SOURCE, 0, StartupMode::System, SYSTEM_NODE_ID))
                .collect();
        }

        Self {
            nodes,
            snapshot,
            last_path: baseline.to_string(),
            last_file: None,
            current_node,
            stack: Vec::new(),
            evals: HashMap::new(),
            counter: 0,
        }
    }

    pub fn feed(&mut self, event: &TraceEvent) {
        if is_eval_with_substitution(&event.raw_command) {
            self.evals.insert(
                event.file.clone(),
                EvalMark {
                    line: event.line,
                    used: false,
                },
            );
        }

        if self.last_file.as_deref() != Some(event.file.as_str()) {
            self.switch_file(event);
        }

        if let Some(value) = event.path_change.as_deref()
            && value != self.last_path
        {
            self.apply_path_change(event, value);
        }
    }

    pub fn feed_all<'a>(&mut self, events: impl IntoIterator<Item = &'a TraceEvent>) {
        for event in events {
            self.feed(event);
        }
    }

    pub fn finish(self) -> Reconstruction {
        Reconstruction {
            nodes: self.nodes,
            entries: self.snapshot,
        }
    }

    fn switch_file(&mut self, event: &TraceEvent) {
        let file = event.file.as_str();

        // Shell library code stays attributed to whoever called it
        if is_noisy_internal_file(file) && !event.changes_path() {
            return;
        }

        if let Some(pos) = self.stack.iter().rposition(|f| f == file) {
            self.stack.truncate(pos + 1);
        } else if starts_top_level_context(file) {
            self.stack.clear();
            self.stack.push(file.to_string());
        } else {
            self.stack.push(file.to_string());
        }

        self.counter += 1;
        let depth = self.stack.len().saturating_sub(1);
        let node = ConfigNode::new(format!("node-{}", self.counter), file, self.counter, depth);

        debug!(file, depth, id = %node.id, "entered config file");

        self.current_node = Some(node.id.clone());
        self.nodes.push(node);
        self.last_file = Some(file.to_string());
    }

    fn apply_path_change(&mut self, event: &TraceEvent, value: &str) {
        let flow_id = self.current_node.clone().unwrap_or_default();
        let mode = StartupMode::guess(&event.file);
        let line = self.attributed_line(event);

        let mut created = 0usize;
        let next: Vec<PathEntry> = split_path_list(value)
            .map(|dir| match self.snapshot.iter().find(|e| e.value == dir) {
                Some(existing) => existing.clone(),
                None => {
                    created += 1;
                    PathEntry::new(dir, event.file.as_str(), line, mode, flow_id.as_str())
                }
            })
            .collect();

        if created > 0
            && line != event.line
            && let Some(mark) = self.evals.get_mut(&event.file)
        {
            mark.used = true;
        }

        debug!(
            file = %event.file,
            line,
            created,
            total = next.len(),
            "PATH changed"
        );

        self.snapshot = next;
        self.last_path = value.to_string();
    }

    /// Line credited for directories first seen in `event`.
    ///
    /// A command substitution's output surfaces after the `eval` that ran it,
    /// so the first change following an unused eval in the same file is
    /// credited to the eval's line.
    fn attributed_line(&self, event: &TraceEvent) -> u32 {
        match self.evals.get(&event.file) {
            Some(mark) if !mark.used && event.line > mark.line => mark.line,
            _ => event.line,
        }
    }
}

/// Replay a complete event list from scratch.
pub fn reconstruct(events: &[TraceEvent], baseline: &str) -> Reconstruction {
    let mut reconstructor = Reconstructor::new(baseline);
    reconstructor.feed_all(events);
    reconstructor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(file: &str, line: u32, value: &str) -> TraceEvent {
        TraceEvent::new(file, line, format!("export PATH={value}")).with_path_change(value)
    }

    fn cmd(file: &str, line: u32, command: &str) -> TraceEvent {
        TraceEvent::new(file, line, command)
    }

    #[test]
    fn test_baseline_seeds_system_node() {
        let rec = reconstruct(&[], "/usr/bin:/bin");
        assert_eq!(rec.nodes.len(), 1);
        assert!(rec.nodes[0].is_system());
        assert_eq!(rec.entries.len(), 2);
        assert!(rec.entries.iter().all(|e| e.flow_id == SYSTEM_NODE_ID));
        assert!(rec.entries.iter().all(|e| e.mode == StartupMode::System));
    }

    #[test]
    fn test_empty_baseline_has_no_system_node() {
        let rec = reconstruct(&[assign("/etc/zprofile", 1, "/a")], "");
        assert_eq!(rec.nodes.len(), 1);
        assert_eq!(rec.nodes[0].file_path, "/etc/zprofile");
        assert_eq!(rec.entries[0].flow_id, "node-1");
    }

    #[test]
    fn test_persisting_directories_keep_attribution() {
        let events = [
            assign("/etc/zprofile", 5, "/usr/bin:/opt/tool"),
            cmd("/home/me/.zshrc", 1, "setopt autocd"),
            assign("/home/me/.zshrc", 9, "/home/me/bin:/usr/bin:/opt/tool"),
        ];
        let rec = reconstruct(&events, "/usr/bin");

        let tool = rec.entries.iter().find(|e| e.value == "/opt/tool").unwrap();
        assert_eq!(tool.source_file, "/etc/zprofile");
        assert_eq!(tool.line_number, 5);
        assert_eq!(tool.mode, StartupMode::Login);

        let bin = &rec.entries[0];
        assert_eq!(bin.value, "/home/me/bin");
        assert_eq!(bin.source_file, "/home/me/.zshrc");
        assert_eq!(bin.mode, StartupMode::Interactive);
    }

    #[test]
    fn test_unchanged_path_value_is_not_a_change() {
        let events = [assign("/etc/zprofile", 2, "/usr/bin:/bin")];
        let rec = reconstruct(&events, "/usr/bin:/bin");
        assert!(rec.entries.iter().all(|e| e.source_file == SYSTEM_SOURCE));
    }

    #[test]
    fn test_nested_source_increases_depth_and_returns() {
        let events = [
            cmd("/home/me/.zshrc", 1, "source ~/.nvm/nvm.sh"),
            cmd("/home/me/.nvm/nvm.sh", 1, "nvm_init"),
            cmd("/home/me/.nvm/lib.sh", 1, "true"),
            cmd("/home/me/.zshrc", 2, "alias ll='ls -l'"),
        ];
        let rec = reconstruct(&events, "");
        let depths: Vec<_> = rec.nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 0]);
        let orders: Vec<_> = rec.nodes.iter().map(|n| n.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_top_level_file_resets_stack() {
        let events = [
            cmd("/etc/zshenv", 1, "true"),
            cmd("/etc/zshenv.d/extra", 1, "true"),
            cmd("/etc/zprofile", 1, "true"),
        ];
        let rec = reconstruct(&events, "");
        let depths: Vec<_> = rec.nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![0, 1, 0]);
    }

    #[test]
    fn test_noisy_file_without_change_is_ignored() {
        let events = [
            cmd("/home/me/.zshrc", 1, "autoload -U compinit"),
            cmd("/usr/share/zsh/5.9/functions/compinit", 10, "true"),
            assign("/home/me/.zshrc", 4, "/x"),
        ];
        let rec = reconstruct(&events, "");
        assert_eq!(rec.nodes.len(), 1);
        assert_eq!(rec.entries[0].flow_id, "node-1");
    }

    #[test]
    fn test_noisy_file_with_change_gets_a_node() {
        let events = [
            cmd("/home/me/.zshrc", 1, "true"),
            assign("/usr/share/zsh/5.9/functions/helper", 3, "/x"),
        ];
        let rec = reconstruct(&events, "");
        assert_eq!(rec.nodes.len(), 2);
        assert_eq!(rec.entries[0].flow_id, "node-2");
    }

    #[test]
    fn test_eval_attribution_fires_once() {
        let events = [
            cmd("/home/me/.zprofile", 3, "eval \"$(/opt/homebrew/bin/brew shellenv)\""),
            cmd("/home/me/.zprofile", 3, "/opt/homebrew/bin/brew shellenv"),
            assign("/home/me/.zprofile", 1, "/opt/homebrew/bin:/opt/homebrew/sbin:/usr/bin"),
            assign("/home/me/.zprofile", 7, "/opt/homebrew/bin:/opt/homebrew/sbin:/usr/bin:/x"),
        ];
        let rec = reconstruct(&events, "/usr/bin");

        // line 1 is not after the eval line, so it stays literal
        let brew = rec.entries.iter().find(|e| e.value == "/opt/homebrew/bin").unwrap();
        assert_eq!(brew.line_number, 1);

        // line 7 is the first later change; it takes the eval's line
        let x = rec.entries.iter().find(|e| e.value == "/x").unwrap();
        assert_eq!(x.line_number, 3);
    }

    #[test]
    fn test_eval_used_after_first_attribution() {
        let events = [
            cmd("/home/me/.zshrc", 2, "eval `pyenv init -`"),
            assign("/home/me/.zshrc", 4, "/pyenv/shims"),
            assign("/home/me/.zshrc", 8, "/pyenv/shims:/later"),
        ];
        let rec = reconstruct(&events, "");
        assert_eq!(rec.entries[0].line_number, 2);
        assert_eq!(rec.entries[1].line_number, 8);
    }

    #[test]
    fn test_repeated_value_copies_first_attribution() {
        let events = [
            assign("/home/me/.zshrc", 1, "/a:/b"),
            assign("/home/me/.zshrc", 2, "/a:/b:/a"),
        ];
        let rec = reconstruct(&events, "");
        assert_eq!(rec.entries.len(), 3);
        assert_eq!(rec.entries[2].line_number, 1);
    }
}
