use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Startup phase a PATH directory was introduced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartupMode {
    Login,
    Interactive,
    #[serde(rename = "Env/All")]
    EnvAll,
    System,
    Session,
    Unknown,
}

impl StartupMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartupMode::Login => "Login",
            StartupMode::Interactive => "Interactive",
            StartupMode::EnvAll => "Env/All",
            StartupMode::System => "System",
            StartupMode::Session => "Session",
            StartupMode::Unknown => "Unknown",
        }
    }

    /// Infer the startup phase from a configuration file name.
    pub fn guess(file: &str) -> Self {
        if ["zprofile", "zlogin", "bash_profile", "profile"]
            .iter()
            .any(|k| file.contains(k))
        {
            return StartupMode::Login;
        }
        if file.contains("zshrc") || file.contains("bashrc") {
            return StartupMode::Interactive;
        }
        if file.contains("zshenv") || file.contains("environment") {
            return StartupMode::EnvAll;
        }
        StartupMode::Unknown
    }
}

impl fmt::Display for StartupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartupMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Login" => Ok(StartupMode::Login),
            "Interactive" => Ok(StartupMode::Interactive),
            "Env/All" | "Env-All" => Ok(StartupMode::EnvAll),
            "System" => Ok(StartupMode::System),
            "Session" => Ok(StartupMode::Session),
            "Unknown" => Ok(StartupMode::Unknown),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// One directory of the final search path.
///
/// The position of an entry in `AnalysisResult::path_entries` is its PATH
/// priority: index 0 is consulted first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    /// Directory as written in PATH (may start with `~`)
    pub value: String,

    /// File credited with adding the directory, or a sentinel source name
    pub source_file: String,

    /// Line inside `source_file` (0 for sentinel sources)
    pub line_number: u32,

    pub mode: StartupMode,

    /// Id of the owning `ConfigNode`
    pub flow_id: String,

    #[serde(default)]
    pub is_duplicate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_of: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,

    #[serde(default)]
    pub is_symlink: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symlink_target: Option<String>,
    /// Earlier entry this symlink resolves to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symlink_points_to: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symlink_message: Option<String>,

    #[serde(default)]
    pub is_session_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_note: Option<String>,

    #[serde(default)]
    pub diagnostics: Vec<String>,
}

impl PathEntry {
    pub fn new(
        value: impl Into<String>,
        source_file: impl Into<String>,
        line_number: u32,
        mode: StartupMode,
        flow_id: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            source_file: source_file.into(),
            line_number,
            mode,
            flow_id: flow_id.into(),
            is_duplicate: false,
            duplicate_of: None,
            duplicate_message: None,
            remediation: None,
            is_symlink: false,
            symlink_target: None,
            symlink_points_to: None,
            symlink_message: None,
            is_session_only: false,
            session_note: None,
            diagnostics: Vec::new(),
        }
    }

    /// Drop every flag the post-processor derives, keeping attribution.
    pub fn clear_derived(&mut self) {
        self.is_duplicate = false;
        self.duplicate_of = None;
        self.duplicate_message = None;
        self.remediation = None;
        self.is_symlink = false;
        self.symlink_target = None;
        self.symlink_points_to = None;
        self.symlink_message = None;
        self.diagnostics.clear();
    }

    /// True for duplicates and for symlinks onto an earlier entry.
    pub fn is_redundant(&self) -> bool {
        self.is_duplicate || self.symlink_points_to.is_some()
    }

    /// `file:line`, or just the file when no line is known.
    pub fn location(&self) -> String {
        if self.line_number == 0 {
            self.source_file.clone()
        } else {
            format!("{}:{}", self.source_file, self.line_number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mode_from_file_names() {
        assert_eq!(StartupMode::guess("/etc/zprofile"), StartupMode::Login);
        assert_eq!(StartupMode::guess("/home/u/.bash_profile"), StartupMode::Login);
        assert_eq!(StartupMode::guess("/home/u/.profile"), StartupMode::Login);
        assert_eq!(StartupMode::guess("/home/u/.zshrc"), StartupMode::Interactive);
        assert_eq!(StartupMode::guess("/etc/bash.bashrc"), StartupMode::Interactive);
        assert_eq!(StartupMode::guess("/etc/zshenv"), StartupMode::EnvAll);
        assert_eq!(StartupMode::guess("/home/u/.nvm/nvm.sh"), StartupMode::Unknown);
    }

    #[test]
    fn test_mode_serializes_with_display_label() {
        let json = serde_json::to_string(&StartupMode::EnvAll).unwrap();
        assert_eq!(json, "\"Env/All\"");
        assert_eq!("Env-All".parse::<StartupMode>().unwrap(), StartupMode::EnvAll);
        assert!("Bogus".parse::<StartupMode>().is_err());
    }

    #[test]
    fn test_clear_derived_keeps_attribution() {
        let mut entry = PathEntry::new("/opt/bin", "/etc/zprofile", 5, StartupMode::Login, "node-1");
        entry.is_duplicate = true;
        entry.duplicate_of = Some(0);
        entry.diagnostics.push("Directory does not exist on disk.".to_string());

        entry.clear_derived();

        assert!(!entry.is_duplicate);
        assert!(entry.diagnostics.is_empty());
        assert_eq!(entry.location(), "/etc/zprofile:5");
        assert_eq!(entry.flow_id, "node-1");
    }
}
