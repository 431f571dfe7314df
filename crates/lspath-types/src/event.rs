use serde::{Deserialize, Serialize};

/// One matched line of shell trace output.
///
/// Produced by the trace line parser in arrival order and consumed exactly
/// once by the reconstructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Source file the shell reported for this line
    pub file: String,

    /// Line number inside `file` (0 when the trace carried an unparseable number)
    pub line: u32,

    /// The command text after the `>` marker
    pub raw_command: String,

    /// New PATH value when this line assigns PATH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_change: Option<String>,
}

impl TraceEvent {
    pub fn new(file: impl Into<String>, line: u32, raw_command: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            raw_command: raw_command.into(),
            path_change: None,
        }
    }

    pub fn with_path_change(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.path_change = if value.is_empty() { None } else { Some(value) };
        self
    }

    pub fn changes_path(&self) -> bool {
        self.path_change.is_some()
    }
}
