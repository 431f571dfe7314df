pub mod listing;
pub mod report;

pub use listing::{ContextView, ListingView, WhichHit, WhichView};
pub use report::ReportView;

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

/// Longest PATH value shown untruncated in the compact report when the width is unknown.
pub const DEFAULT_PATH_WIDTH: usize = 60;

pub mod icons {
    pub const OK: &str = " ";
    pub const DUPLICATE: &str = "≈";
    pub const SYMLINK: &str = "→";
    pub const MISSING: &str = "✗";
    pub const SESSION: &str = "◆";
    pub const FIRST: &str = "↑";
    pub const LAST: &str = "↓";
}

/// Terminal capabilities the text views adapt to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
    pub path_width: usize,
}

impl Style {
    /// Colour and width only when stdout is a terminal; pipes get plain text.
    pub fn detect() -> Self {
        if !std::io::stdout().is_terminal() {
            return Self::plain();
        }

        let path_width = terminal_size()
            .map(|(Width(w), _)| (w as usize).saturating_sub(40))
            .unwrap_or(DEFAULT_PATH_WIDTH)
            .max(DEFAULT_PATH_WIDTH);

        Self {
            color: true,
            path_width,
        }
    }

    pub fn plain() -> Self {
        Self {
            color: false,
            path_width: DEFAULT_PATH_WIDTH,
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warn(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// Shorten `text` to the path width, keeping the head.
    pub fn truncate(&self, text: &str) -> String {
        if text.chars().count() <= self.path_width {
            return text.to_string();
        }
        let head: String = text.chars().take(self.path_width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
