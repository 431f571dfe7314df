use super::Style;
use lspath_core::{DirListing, LineContext};
use lspath_engine::CommandMatch;
use serde::Serialize;
use std::fmt;

// --------------------------------------------------------
// Line Context View
// --------------------------------------------------------

pub struct ContextView<'a> {
    data: &'a LineContext,
    style: Style,
}

impl<'a> ContextView<'a> {
    pub fn new(data: &'a LineContext, style: Style) -> Self {
        Self { data, style }
    }
}

impl<'a> fmt::Display for ContextView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Errors are reported by the caller
        if self.data.error.is_some() {
            return Ok(());
        }

        writeln!(
            f,
            "{}",
            self.style.heading(&format!("{}:{}", self.data.file, self.data.line_number))
        )?;
        for line in &self.data.lines {
            let marker = if line.is_target { ">" } else { " " };
            let row = format!("{} {:>5} | {}", marker, line.number, line.text);
            if line.is_target {
                writeln!(f, "{}", self.style.accent(&row))?;
            } else {
                writeln!(f, "{}", row)?;
            }
        }
        Ok(())
    }
}

// --------------------------------------------------------
// Directory Listing View
// --------------------------------------------------------

pub struct ListingView<'a> {
    dir: &'a str,
    rows: &'a [DirListing],
    style: Style,
}

impl<'a> ListingView<'a> {
    pub fn new(dir: &'a str, rows: &'a [DirListing], style: Style) -> Self {
        Self { dir, rows, style }
    }
}

impl<'a> fmt::Display for ListingView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}",
            self.style
                .heading(&format!("{} ({} entries)", self.dir, self.rows.len()))
        )?;

        let size_width = self
            .rows
            .iter()
            .map(|r| r.size.to_string().len())
            .max()
            .unwrap_or(1);

        for row in self.rows {
            let name = if row.is_dir {
                self.style.accent(&format!("{}/", row.name))
            } else {
                row.name.clone()
            };
            writeln!(
                f,
                "{} {:>width$} {} {}",
                row.mode,
                row.size,
                row.modified.as_deref().unwrap_or("-"),
                name,
                width = size_width
            )?;
        }
        Ok(())
    }
}

// --------------------------------------------------------
// Command Lookup View
// --------------------------------------------------------

/// A command match joined with the attribution of the directory it lives in.
#[derive(Debug, Serialize)]
pub struct WhichHit {
    #[serde(flatten)]
    pub found: CommandMatch,
    pub source_file: String,
    pub line_number: u32,
}

pub struct WhichView<'a> {
    query: &'a str,
    hits: &'a [WhichHit],
    style: Style,
}

impl<'a> WhichView<'a> {
    pub fn new(query: &'a str, hits: &'a [WhichHit], style: Style) -> Self {
        Self { query, hits, style }
    }
}

impl<'a> fmt::Display for WhichView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.hits.is_empty() {
            return Ok(());
        }

        for (rank, hit) in self.hits.iter().enumerate() {
            let location = if hit.line_number == 0 {
                hit.source_file.clone()
            } else {
                format!("{}:{}", hit.source_file, hit.line_number)
            };
            let found = format!("{}/{}", hit.found.directory, hit.found.file_name);
            let found = if rank == 0 {
                self.style.heading(&found)
            } else {
                self.style.dim(&found)
            };
            let shadow = if rank > 0 && hit.found.exact && self.hits[0].found.exact {
                " (shadowed)"
            } else {
                ""
            };
            writeln!(f, "{}{}", found, shadow)?;
            writeln!(
                f,
                "    » PATH entry #{}, added by {}",
                hit.found.index + 1,
                location
            )?;
        }

        if !self.hits.iter().any(|h| h.found.exact) {
            writeln!(f, "No exact match for '{}'; showing prefix matches.", self.query)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lspath_core::ContextLine;

    #[test]
    fn test_context_view_marks_target() {
        let context = LineContext {
            file: "~/.zshrc".to_string(),
            line_number: 2,
            lines: vec![
                ContextLine {
                    number: 1,
                    text: "# tools".to_string(),
                    is_target: false,
                },
                ContextLine {
                    number: 2,
                    text: "export PATH=$HOME/bin:$PATH".to_string(),
                    is_target: true,
                },
            ],
            error: None,
        };

        insta::assert_snapshot!(ContextView::new(&context, Style::plain()).to_string(), @r"
        ~/.zshrc:2
              1 | # tools
        >     2 | export PATH=$HOME/bin:$PATH
        ");
    }

    #[test]
    fn test_which_view_reports_shadowing() {
        let hits = vec![
            WhichHit {
                found: CommandMatch {
                    index: 0,
                    directory: "/opt/homebrew/bin".to_string(),
                    file_name: "git".to_string(),
                    exact: true,
                },
                source_file: "/etc/zprofile".to_string(),
                line_number: 4,
            },
            WhichHit {
                found: CommandMatch {
                    index: 2,
                    directory: "/usr/bin".to_string(),
                    file_name: "git".to_string(),
                    exact: true,
                },
                source_file: "System (Default)".to_string(),
                line_number: 0,
            },
        ];

        insta::assert_snapshot!(WhichView::new("git", &hits, Style::plain()).to_string(), @r"
        /opt/homebrew/bin/git
            » PATH entry #1, added by /etc/zprofile:4
        /usr/bin/git (shadowed)
            » PATH entry #3, added by System (Default)
        ");
    }
}
