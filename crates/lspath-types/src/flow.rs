use serde::{Deserialize, Serialize};

/// Source name for directories present before any configuration file ran
pub const SYSTEM_SOURCE: &str = "System (Default)";

/// Source name for directories only found in the live session
pub const SESSION_SOURCE: &str = "Session (Manual/Runtime)";

/// Source name used when the live PATH is shown without a trace
pub const CURRENT_SESSION_SOURCE: &str = "Current Session";

pub const SYSTEM_NODE_ID: &str = "node-0";
pub const SESSION_NODE_ID: &str = "session-node";

/// One step of the configuration-file execution timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    pub id: String,

    /// Configuration file, or one of the sentinel source names
    pub file_path: String,

    /// 1-based position in the cleaned timeline
    pub order: usize,

    /// Inferred sourcing depth (0 = started by the shell itself)
    pub depth: usize,

    #[serde(default)]
    pub description: String,

    /// Placeholder for a canonical file that never ran
    #[serde(default)]
    pub not_executed: bool,

    /// Indices into `AnalysisResult::path_entries`
    #[serde(default)]
    pub entries: Vec<usize>,
}

impl ConfigNode {
    pub fn new(id: impl Into<String>, file_path: impl Into<String>, order: usize, depth: usize) -> Self {
        let file_path = file_path.into();
        Self {
            id: id.into(),
            description: describe_config_file(&file_path).to_string(),
            file_path,
            order,
            depth,
            not_executed: false,
            entries: Vec::new(),
        }
    }

    /// Placeholder node for a canonical file that did not execute.
    pub fn ghost(id: impl Into<String>, file_path: impl Into<String>) -> Self {
        let mut node = Self::new(id, file_path, 0, 0);
        node.not_executed = true;
        node
    }

    pub fn system() -> Self {
        Self::new(SYSTEM_NODE_ID, SYSTEM_SOURCE, 0, 0)
    }

    pub fn session() -> Self {
        Self::new(SESSION_NODE_ID, SESSION_SOURCE, 0, 0)
    }

    pub fn is_system(&self) -> bool {
        self.file_path == SYSTEM_SOURCE
    }
}

/// Human-readable role of a configuration file, used as a node caption.
pub fn describe_config_file(path: &str) -> &'static str {
    match path {
        SYSTEM_SOURCE => return "Initial environment PATH",
        SESSION_SOURCE => return "Paths added in this terminal session",
        CURRENT_SESSION_SOURCE => return "Your current terminal session's PATH",
        _ => {}
    }

    if path.starts_with("/etc/") {
        let name = path.rsplit('/').next().unwrap_or(path);
        return if name.contains("env") {
            "(system-wide env)"
        } else if name.contains("login") {
            "(system-wide login)"
        } else if name.contains("profile") {
            "(system-wide profile)"
        } else if name.contains("rc") {
            "(system-wide rc)"
        } else {
            "(system-wide)"
        };
    }

    const PERSONAL: [&str; 8] = [
        "/.zshenv",
        "/.zprofile",
        "/.zshrc",
        "/.zlogin",
        "/.profile",
        "/.bash_profile",
        "/.bash_login",
        "/.bashrc",
    ];
    if path.starts_with('~') || PERSONAL.iter().any(|p| path.contains(p)) {
        return "(user-specific)";
    }
    ""
}
