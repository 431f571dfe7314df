//! Whole-result findings shown above the entry list.

use lspath_types::{ConfigNode, PathEntry};

pub const TRACE_MODE_INFO: &str = "INFO: Trace Mode - showing PATH derived from shell config files. This is a \"pure\" view of what a fresh terminal would have. Session-specific paths (e.g., activated virtual environments) are not shown.";
pub const UNIFIED_MODE_INFO: &str = "INFO: Unified view - showing your actual PATH with full attribution.";
pub const UNIFIED_SESSION_INFO: &str =
    "INFO: Entries marked as 'Session' were added manually or by tools (not from shell config files).";
pub const SESSION_MODE_INFO: &str =
    "INFO: Showing current session PATH. Use --mode unified or --mode trace to see where paths originate from shell config files.";
pub const HOMEBREW_SHADOW_ADVICE: &str = "ADVICE: /usr/local/bin appears before Homebrew in PATH. Brew packages may be shadowed by system-installed ones.";

const LOGIN_MARKERS: [&str; 3] = ["zprofile", "zlogin", "bash_profile"];

/// A login shell runs at least one of the login-only startup files.
pub fn is_login_shell(nodes: &[ConfigNode]) -> bool {
    nodes
        .iter()
        .filter(|n| !n.not_executed)
        .any(|n| LOGIN_MARKERS.iter().any(|m| n.file_path.contains(m)))
}

pub fn shell_mode_line(nodes: &[ConfigNode]) -> &'static str {
    if is_login_shell(nodes) {
        "INFO: Detected as a LOGIN shell. This is typical for terminal startups on macOS."
    } else {
        "INFO: Detected as an INTERACTIVE (non-login) shell."
    }
}

/// `/usr/local/bin` ahead of the first Homebrew directory.
pub fn homebrew_shadowing(entries: &[PathEntry]) -> Option<&'static str> {
    let brew = entries.iter().position(|e| e.value.starts_with("/opt/homebrew"))?;
    let local = entries.iter().position(|e| e.value.starts_with("/usr/local/bin"))?;
    (local < brew).then_some(HOMEBREW_SHADOW_ADVICE)
}

pub fn for_trace(nodes: &[ConfigNode], entries: &[PathEntry]) -> Vec<String> {
    let mut lines = vec![shell_mode_line(nodes).to_string(), TRACE_MODE_INFO.to_string()];
    lines.extend(homebrew_shadowing(entries).map(str::to_string));
    lines
}

pub fn for_unified(nodes: &[ConfigNode], entries: &[PathEntry]) -> Vec<String> {
    let mut lines = vec![
        shell_mode_line(nodes).to_string(),
        UNIFIED_MODE_INFO.to_string(),
        UNIFIED_SESSION_INFO.to_string(),
    ];
    lines.extend(homebrew_shadowing(entries).map(str::to_string));
    lines
}

pub fn for_session(entries: &[PathEntry]) -> Vec<String> {
    let mut lines = vec![SESSION_MODE_INFO.to_string()];
    lines.extend(homebrew_shadowing(entries).map(str::to_string));
    lines
}
